//! Search result types and statistics

use crate::oracle::{TestOutcome, TestStatus};
use std::time::Duration;

/// Counters for one search session
#[derive(Debug, Clone, Default)]
pub struct SessionStatistics {
    /// Cases run (including skipped ones)
    pub runs: u64,
    /// Cases where the solver gave the expected answer
    pub agreements: u64,
    /// Cases where the solver contradicted the ground truth
    pub mismatches: u64,
    /// Timeouts, `unknown`, unreadable output and driver failures
    pub inconclusive: u64,
    /// Cases with no formula (identical words in unsat mode)
    pub skipped: u64,
    /// Runs where the solver wrote to stderr
    pub solver_errors: u64,
    /// Total wall-clock time
    pub elapsed_time: Duration,
}

impl SessionStatistics {
    /// Count one finished case
    pub fn record(&mut self, outcome: &TestOutcome) {
        self.runs += 1;
        match outcome.status {
            TestStatus::Agreement => self.agreements += 1,
            TestStatus::Mismatch => self.mismatches += 1,
            TestStatus::Inconclusive => self.inconclusive += 1,
            TestStatus::Skipped => self.skipped += 1,
        }
        if outcome.solver_errors {
            self.solver_errors += 1;
        }
    }

    /// Cases per second
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.runs as f64 / secs
        }
    }

    /// Format statistics as a human-readable string
    pub fn format_summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Time: {:.2?}\n", self.elapsed_time));
        s.push_str(&format!("Runs: {}\n", self.runs));
        s.push_str(&format!("Throughput: {:.2} runs/sec\n", self.throughput()));
        s.push_str(&format!("Agreements: {}\n", self.agreements));
        s.push_str(&format!("Mismatches: {}\n", self.mismatches));
        if self.inconclusive > 0 {
            s.push_str(&format!("Inconclusive: {}\n", self.inconclusive));
        }
        if self.skipped > 0 {
            s.push_str(&format!("Skipped: {}\n", self.skipped));
        }
        if self.solver_errors > 0 {
            s.push_str(&format!("Runs with solver errors: {}\n", self.solver_errors));
        }
        s
    }
}

/// Result of a sweep
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub statistics: SessionStatistics,
    /// Every mismatching case, in completion order
    pub mismatches: Vec<TestOutcome>,
    /// The sweep was stopped before every case ran
    pub cancelled: bool,
}

/// Why a retry loop ended
#[derive(Debug, Clone)]
pub enum RetryTermination {
    /// The solver contradicted the ground truth
    Mismatch(TestOutcome),
    /// The stop signal was raised
    Cancelled,
    /// The attempt limit was reached
    AttemptLimit,
    /// The time limit was reached
    Deadline,
}

/// Result of a retry loop
#[derive(Debug, Clone)]
pub struct RetryResult {
    pub termination: RetryTermination,
    pub statistics: SessionStatistics,
}

impl RetryResult {
    pub fn found_mismatch(&self) -> bool {
        matches!(self.termination, RetryTermination::Mismatch(_))
    }
}
