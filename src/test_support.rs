//! Shell-script stand-ins for a real solver

use crate::solver::SolverCommand;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SCRIPT: AtomicUsize = AtomicUsize::new(0);

/// Write `body` to a fresh script under `dir` and return a command running it
/// through `/bin/sh`. The script is never exec'd directly, which avoids
/// `ETXTBSY` when tests spawn processes concurrently.
pub fn fake_solver(dir: &Path, body: &str) -> SolverCommand {
    let id = NEXT_SCRIPT.fetch_add(1, Ordering::Relaxed);
    let path = dir.join(format!("solver_{id}.sh"));
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    SolverCommand::new("/bin/sh").with_args([path.display().to_string()])
}

/// Answers `sat` to everything after consuming its input.
pub const ALWAYS_SAT: &str = "cat > /dev/null\necho sat";

/// Answers `unsat` to everything after consuming its input.
pub const ALWAYS_UNSAT: &str = "cat > /dev/null\necho unsat";

/// Passes the operator regression formula, then answers `unsat`.
pub const SANE_THEN_UNSAT: &str =
    "input=$(cat)\ncase \"$input\" in *'(insert \"a\" 0 \"\")'*) echo sat;; *) echo unsat;; esac";
