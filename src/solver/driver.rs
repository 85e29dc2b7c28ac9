//! One solver process per document
//!
//! The document goes in on stdin from a writer thread while two reader
//! threads drain stdout and stderr, so a solver that answers before it has
//! read all of its input cannot deadlock the driver. The solver runs in its
//! own process group: wrapper scripts that do not `exec` leave the real solver
//! as a grandchild, and the whole group is killed when the run ends. Waiting
//! for the process and for its output are both bounded by the time limit.

use crate::error::{OracleError, Result};
use crate::solver::config::SolverCommand;
use crate::solver::verdict::Verdict;
use crossbeam_channel::{bounded, Receiver};
use std::io::{ErrorKind, Read, Write};
#[cfg(unix)]
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Time allowed for reading output once the solver has exited, even when
/// the time limit is already spent
const OUTPUT_GRACE: Duration = Duration::from_millis(100);

/// Captured result of one solver run
#[derive(Debug, Clone)]
pub struct SolverRun {
    pub verdict: Verdict,
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed or never started
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
}

impl SolverRun {
    fn failed(reason: String, elapsed: Duration) -> Self {
        Self {
            verdict: Verdict::Failed(reason),
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            elapsed,
        }
    }

    fn timed_out(elapsed: Duration) -> Self {
        Self {
            verdict: Verdict::Timeout,
            stdout: String::new(),
            stderr: String::new(),
            exit_code: None,
            elapsed,
        }
    }

    /// Whether the solver wrote anything to stderr
    pub fn has_errors(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// SIGKILL every process in the group led by `child`.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    if let Ok(pid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: kill(2) takes plain integers; a negative pid names the group.
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
}

#[cfg(not(unix))]
fn kill_process_group(_child: &Child) {}

/// Kills the solver's process group and reaps the solver unless it was
/// reaped normally.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn kill(&mut self) {
        kill_process_group(&self.child);
        let _ = self.child.kill();
        let _ = self.child.wait();
        self.reaped = true;
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            self.kill();
        }
    }
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<String> {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(String::from_utf8_lossy(&buf).into_owned());
    });
    rx
}

/// Drained pipe contents, or `None` if the pipe is still open at `deadline`.
fn collect_output(pipe: Option<Receiver<String>>, deadline: Instant) -> Option<String> {
    match pipe {
        Some(rx) => rx
            .recv_timeout(deadline.saturating_duration_since(Instant::now()))
            .ok(),
        None => Some(String::new()),
    }
}

/// Runs documents through an external solver binary.
#[derive(Debug, Clone, Default)]
pub struct SolverDriver {
    command: SolverCommand,
}

impl SolverDriver {
    pub fn new(command: SolverCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &SolverCommand {
        &self.command
    }

    /// Run `document` with a wall-clock limit. Never fails: a process that
    /// cannot be driven yields [`Verdict::Failed`].
    pub fn run(&self, document: &str, timeout: Duration) -> SolverRun {
        let start = Instant::now();
        match self.try_run(document, timeout) {
            Ok(run) => run,
            Err(e) => {
                warn!(command = %self.command.display(), "{e}");
                SolverRun::failed(e.to_string(), start.elapsed())
            }
        }
    }

    /// [`run`](Self::run), surfacing driving failures as errors.
    pub fn try_run(&self, document: &str, timeout: Duration) -> Result<SolverRun> {
        let start = Instant::now();
        let mut command = Command::new(&self.command.program);
        command
            .args(&self.command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        // Own group: killable as a unit, and out of reach of the terminal's Ctrl-C
        #[cfg(unix)]
        command.process_group(0);
        let child = command.spawn().map_err(|e| {
            OracleError::Solver(format!(
                "failed to spawn `{}`: {e}",
                self.command.program.display()
            ))
        })?;
        let mut guard = ChildGuard {
            child,
            reaped: false,
        };

        if let Some(mut stdin) = guard.child.stdin.take() {
            let input = document.to_owned();
            thread::spawn(move || {
                if let Err(e) = stdin.write_all(input.as_bytes()) {
                    if e.kind() != ErrorKind::BrokenPipe {
                        warn!("failed to write document to solver: {e}");
                    }
                }
            });
        }
        let stdout = guard.child.stdout.take().map(drain);
        let stderr = guard.child.stderr.take().map(drain);

        let status = guard
            .child
            .wait_timeout(timeout)
            .map_err(|e| OracleError::Solver(format!("failed to wait for solver: {e}")))?;

        let Some(status) = status else {
            guard.kill();
            debug!(timeout_ms = timeout.as_millis() as u64, "solver timed out");
            return Ok(SolverRun::timed_out(start.elapsed()));
        };
        guard.reaped = true;
        // Leftover group members would keep the output pipes open
        kill_process_group(&guard.child);

        let deadline = (start + timeout).max(Instant::now() + OUTPUT_GRACE);
        let Some(stdout) = collect_output(stdout, deadline) else {
            warn!("solver exited but its output stayed open past the time limit");
            return Ok(SolverRun::timed_out(start.elapsed()));
        };
        let stderr = collect_output(stderr, deadline).unwrap_or_default();

        if !stderr.trim().is_empty() {
            warn!(stderr = %stderr.trim(), "solver raised an error");
        }

        let verdict = Verdict::parse(&stdout);
        debug!(%verdict, exit_code = ?status.code(), "solver finished");
        Ok(SolverRun {
            verdict,
            stdout,
            stderr,
            exit_code: status.code(),
            elapsed: start.elapsed(),
        })
    }
}
