#![cfg(unix)]

use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::Duration;
use tempfile::TempDir;
use wait_timeout::ChildExt;

/// Passes the operator regression formula, then answers `unsat` to everything.
const SANE_THEN_UNSAT: &str =
    "input=$(cat)\ncase \"$input\" in *'(insert \"a\" 0 \"\")'*) echo sat;; *) echo unsat;; esac";

const ALWAYS_SAT: &str = "cat > /dev/null\necho sat";

const ALWAYS_UNSAT: &str = "cat > /dev/null\necho unsat";

fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_edit-oracle"))
}

fn write_solver(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("solver.sh");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    path
}

/// Run the binary against a shell-script solver stored in `dir`.
fn run_with_solver(dir: &TempDir, body: &str, args: &[&str]) -> Output {
    let script = write_solver(dir.path(), body);
    let bug_log = dir.path().join("bugs.txt");
    Command::new(get_binary_path())
        .args(args)
        .arg("--solver")
        .arg("/bin/sh")
        .arg("--solver-arg")
        .arg(&script)
        .arg("--bug-log")
        .arg(&bug_log)
        .arg("--timeout")
        .arg("10")
        .output()
        .expect("Failed to execute edit-oracle")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_try_reports_mismatch_and_appends_log() {
    let dir = TempDir::new().unwrap();
    let output = run_with_solver(
        &dir,
        SANE_THEN_UNSAT,
        &["try", "cat", "cats", "--mode", "sat", "--backend", "seq"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = stdout(&output);
    assert!(stdout.contains("MISMATCH cat, cats"), "stdout: {}", stdout);
    assert!(stdout.contains("Solver made 1 mistakes"));

    let log = fs::read_to_string(dir.path().join("bugs.txt")).unwrap();
    assert_eq!(log, "cat, cats, solver: seq, mode: sat, seed: none\n");
}

#[test]
fn test_try_correct_answers_record_nothing() {
    let dir = TempDir::new().unwrap();
    let output = run_with_solver(
        &dir,
        ALWAYS_SAT,
        &["try", "cat", "cats", "--mode", "sat", "--backend", "both"],
    );

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("mode: sat, solver: seq"));
    assert!(stdout.contains("mode: sat, solver: z3str3"));
    assert!(stdout.contains("Solver made 0 mistakes"));
    assert!(!dir.path().join("bugs.txt").exists());
}

#[test]
fn test_sanity_failure_exits_with_status_2() {
    let dir = TempDir::new().unwrap();
    let output = run_with_solver(&dir, ALWAYS_UNSAT, &["try", "cat", "cats"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sanity check failed"), "stderr: {}", stderr);
    assert!(!stdout(&output).contains("MISMATCH"));
}

#[test]
fn test_try_unsat_mode_reports_seed() {
    let dir = TempDir::new().unwrap();
    let output = run_with_solver(
        &dir,
        ALWAYS_SAT,
        &[
            "try", "kitten", "sitting", "--mode", "unsat", "--backend", "z3str3", "--seed", "42",
        ],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("replay with --seed 42"));
    let log = fs::read_to_string(dir.path().join("bugs.txt")).unwrap();
    assert_eq!(log, "kitten, sitting, solver: z3str3, mode: unsat, seed: 42\n");
}

#[test]
fn test_retry_gives_up_after_max_attempts() {
    let dir = TempDir::new().unwrap();
    let output = run_with_solver(
        &dir,
        ALWAYS_SAT,
        &[
            "try",
            "cat",
            "dog",
            "--mode",
            "sat",
            "--retry",
            "--max-attempts",
            "3",
        ],
    );

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("attempt 3:"));
    assert!(stdout.contains("Gave up after 3 attempts"), "stdout: {}", stdout);
}

#[test]
fn test_retry_stops_at_mismatch() {
    let dir = TempDir::new().unwrap();
    let output = run_with_solver(
        &dir,
        SANE_THEN_UNSAT,
        &["try", "cat", "dog", "--retry", "--max-attempts", "10"],
    );

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Found a mistake after 1 attempts"), "stdout: {}", stdout);
}

#[test]
fn test_search_summary() {
    let dir = TempDir::new().unwrap();
    let output = run_with_solver(
        &dir,
        SANE_THEN_UNSAT,
        &["search", "--runs", "4", "--seed", "1", "--jobs", "2"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = stdout(&output);
    assert!(stdout.contains("Running 4 cases on 2 workers"));
    assert!(stdout.contains("Runs: 4"));
    // Only the sat-mode cases can be contradicted by an unsat answer
    assert!(stdout.contains("Mismatches: 2"), "stdout: {}", stdout);

    let log = fs::read_to_string(dir.path().join("bugs.txt")).unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(log.lines().all(|line| line.contains("mode: sat")));
}

#[test]
fn test_missing_solver_is_not_fatal() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(get_binary_path())
        .args(["try", "cat", "dog", "--mode", "sat", "--backend", "seq"])
        .arg("--solver")
        .arg(dir.path().join("no-such-solver"))
        .arg("--bug-log")
        .arg(dir.path().join("bugs.txt"))
        .output()
        .expect("Failed to execute edit-oracle");

    assert!(output.status.success());
    assert!(stdout(&output).contains("Solver made 0 mistakes"));
}

#[test]
fn test_log_writes_documents() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(get_binary_path())
        .args([
            "log", "foo", "bar", "--mode", "both", "--backend", "seq", "--seed", "3",
        ])
        .arg("--output-dir")
        .arg(dir.path())
        .output()
        .expect("Failed to execute edit-oracle");

    assert!(output.status.success());
    let sat = fs::read_to_string(dir.path().join("foo_bar_sat_seq.smt2")).unwrap();
    let unsat = fs::read_to_string(dir.path().join("foo_bar_unsat_seq.smt2")).unwrap();

    assert!(sat.starts_with("(set-option :smt.string_solver seq)\n"));
    assert!(sat.ends_with("(check-sat)\n"));
    assert_eq!(sat.matches("(declare-const ").count(), 6);
    assert_eq!(unsat.matches("(declare-const idx_").count(), 2);

    let stdout = stdout(&output);
    assert!(stdout.contains("; seed 3"));
    assert!(stdout.contains("(assert (= (replace ch_2 idx_2"));
}

#[test]
fn test_log_skips_identical_words_in_unsat_mode() {
    let dir = TempDir::new().unwrap();
    let output = Command::new(get_binary_path())
        .args(["log", "same", "same", "--mode", "unsat", "--backend", "seq"])
        .arg("--output-dir")
        .arg(dir.path())
        .output()
        .expect("Failed to execute edit-oracle");

    assert!(output.status.success());
    assert!(stdout(&output).contains("identical words"));
    assert!(!dir.path().join("same_same_unsat_seq.smt2").exists());
}

#[test]
fn test_interrupt_cancels_retry_and_prints_summary() {
    let dir = TempDir::new().unwrap();
    let script = write_solver(dir.path(), "cat > /dev/null\nsleep 0.1\necho sat");
    let mut child = Command::new(get_binary_path())
        .args(["try", "cat", "dog", "--mode", "sat", "--retry"])
        .arg("--solver")
        .arg("/bin/sh")
        .arg("--solver-arg")
        .arg(&script)
        .arg("--bug-log")
        .arg(dir.path().join("bugs.txt"))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("Failed to execute edit-oracle");

    // The handler is installed before the first attempt is reported
    let mut stdout = BufReader::new(child.stdout.take().unwrap());
    let mut seen = String::new();
    loop {
        let mut line = String::new();
        let read = stdout.read_line(&mut line).unwrap();
        assert!(read > 0, "exited before retrying: {}", seen);
        seen.push_str(&line);
        if line.starts_with("attempt 1:") {
            break;
        }
    }

    let reader = thread::spawn(move || {
        let mut rest = String::new();
        stdout.read_to_string(&mut rest).unwrap();
        rest
    });
    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGINT);
    }

    let status = match child.wait_timeout(Duration::from_secs(30)).unwrap() {
        Some(status) => status,
        None => {
            let _ = child.kill();
            panic!("edit-oracle ignored Ctrl-C");
        }
    };
    let rest = reader.join().unwrap();

    assert_eq!(status.code(), Some(130));
    assert!(rest.contains("Cancelled after"), "stdout: {}", rest);
    assert!(rest.contains("Solver made 0 mistakes"), "stdout: {}", rest);
}

#[test]
fn test_log_file_names_stay_in_output_dir() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("out");
    let output = Command::new(get_binary_path())
        .args(["log", "a/b", "..", "--mode", "sat", "--backend", "seq"])
        .arg("--output-dir")
        .arg(&output_dir)
        .output()
        .expect("Failed to execute edit-oracle");

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let written: Vec<_> = fs::read_dir(&output_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(written, vec!["a_b____sat_seq.smt2".to_string()]);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}
