//! The differential tester
//!
//! A case is a pair of words run under one [`OracleConfig`]: synthesize the
//! formula for the mode, assemble it for the backend, run the solver and
//! compare its verdict with the ground truth. Only the wrong definite verdict
//! counts as a mismatch; timeouts, `unknown` and unreadable output are
//! inconclusive.

use crate::error::{OracleError, Result};
use crate::oracle::log::{MismatchLog, MismatchRecord};
use crate::oracle::mode::{Mode, OracleConfig};
use crate::smt::{assemble, check_representable, sanity_check_document, StringBackend};
use crate::solver::{SolverDriver, Verdict};
use crate::synthesis::{synthesize_minimal_with, synthesize_sub_minimal, TieBreak};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Tester settings
#[derive(Debug, Clone)]
pub struct TesterConfig {
    /// Wall-clock limit per solver run
    pub timeout: Duration,
    /// Report inconclusive runs at info level
    pub verbose: bool,
    /// Tie-break order of the minimal synthesizer
    pub tie_break: TieBreak,
}

impl Default for TesterConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            verbose: false,
            tie_break: TieBreak::default(),
        }
    }
}

impl TesterConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

/// How a case ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    /// The solver gave the expected answer
    Agreement,
    /// The solver gave the wrong definite answer
    Mismatch,
    /// Timeout, `unknown`, unrecognised output or a driver failure
    Inconclusive,
    /// No formula exists for this case (identical words in unsat mode)
    Skipped,
}

/// Everything known about one finished case
#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub word1: String,
    pub word2: String,
    pub config: OracleConfig,
    /// `None` when the case was skipped before reaching the solver
    pub verdict: Option<Verdict>,
    pub seed: Option<u64>,
    pub status: TestStatus,
    /// The solver wrote to stderr
    pub solver_errors: bool,
}

impl TestOutcome {
    pub fn is_mismatch(&self) -> bool {
        self.status == TestStatus::Mismatch
    }
}

/// A solver document ready for one case
#[derive(Debug, Clone)]
pub struct CaseDocument {
    pub document: String,
    /// Seed actually used in unsat mode
    pub seed: Option<u64>,
    /// Levenshtein distance of the two words
    pub distance: usize,
}

/// Build the document for `word1`/`word2` under `config`.
///
/// In unsat mode `seed` selects the edit kinds; a fresh one is drawn when it
/// is `None`. Sat mode ignores it. Words with characters no SMT-LIB string
/// can hold are rejected as a configuration error.
pub fn build_document(
    word1: &str,
    word2: &str,
    config: OracleConfig,
    seed: Option<u64>,
    tie_break: TieBreak,
) -> Result<CaseDocument> {
    check_representable(word1)?;
    check_representable(word2)?;
    match config.mode {
        Mode::Sat => {
            let script = synthesize_minimal_with(word1, word2, tie_break)?;
            Ok(CaseDocument {
                document: assemble(&script.formula, config.backend),
                seed: None,
                distance: script.distance,
            })
        }
        Mode::Unsat => {
            let script = synthesize_sub_minimal(word1, word2, seed)?;
            Ok(CaseDocument {
                document: assemble(&script.formula, config.backend),
                seed: Some(script.seed),
                distance: script.distance,
            })
        }
    }
}

/// Runs cases through one solver and records mismatches.
#[derive(Debug)]
pub struct Tester {
    driver: SolverDriver,
    config: TesterConfig,
    log: Arc<MismatchLog>,
}

impl Tester {
    pub fn new(driver: SolverDriver, config: TesterConfig, log: Arc<MismatchLog>) -> Self {
        Self {
            driver,
            config,
            log,
        }
    }

    pub fn config(&self) -> &TesterConfig {
        &self.config
    }

    pub fn log(&self) -> &Arc<MismatchLog> {
        &self.log
    }

    /// Check the operator definitions once per backend. An `unsat` answer
    /// means the definitions themselves are broken under that backend and no
    /// verdict from it can be trusted.
    pub fn sanity_check(&self, backends: &[StringBackend]) -> Result<()> {
        for &backend in backends {
            let run = self
                .driver
                .run(&sanity_check_document(backend), self.config.timeout);
            match &run.verdict {
                Verdict::Sat => info!(%backend, "operator definitions passed sanity check"),
                Verdict::Unsat => {
                    error!(%backend, "operator definitions failed sanity check");
                    return Err(OracleError::SanityCheckFailure {
                        backend: backend.to_string(),
                        verdict: run.verdict.to_string(),
                    });
                }
                other => warn!(%backend, verdict = %other, "sanity check was inconclusive"),
            }
        }
        Ok(())
    }

    /// Run one case; true when the solver contradicted the ground truth.
    pub fn test(
        &self,
        word1: &str,
        word2: &str,
        mode: Mode,
        backend: StringBackend,
        seed: Option<u64>,
    ) -> bool {
        self.run_case(word1, word2, OracleConfig::new(mode, backend), seed)
            .is_mismatch()
    }

    /// Run one case and report everything about it.
    pub fn run_case(
        &self,
        word1: &str,
        word2: &str,
        config: OracleConfig,
        seed: Option<u64>,
    ) -> TestOutcome {
        let mut outcome = TestOutcome {
            word1: word1.to_string(),
            word2: word2.to_string(),
            config,
            verdict: None,
            seed: None,
            status: TestStatus::Skipped,
            solver_errors: false,
        };

        let case = match build_document(word1, word2, config, seed, self.config.tie_break) {
            Ok(case) => case,
            Err(OracleError::IdenticalWords(word)) => {
                debug!(%word, %config, "identical words have no unsat oracle, skipping");
                return outcome;
            }
            Err(e) => {
                warn!(word1, word2, %config, "failed to synthesize formula: {e}");
                outcome.status = TestStatus::Inconclusive;
                return outcome;
            }
        };
        outcome.seed = case.seed;

        debug!(word1, word2, %config, distance = case.distance, "running case");
        let run = self.driver.run(&case.document, self.config.timeout);
        outcome.solver_errors = run.has_errors();

        outcome.status = if run.verdict == config.mode.wrong_verdict() {
            warn!(word1, word2, %config, verdict = %run.verdict, "solver made a mistake");
            let record = MismatchRecord {
                word1: word1.to_string(),
                word2: word2.to_string(),
                config,
                seed: case.seed,
            };
            if let Err(e) = self.log.record(record) {
                error!("{e}");
            }
            TestStatus::Mismatch
        } else if run.verdict == config.mode.expected_verdict() {
            TestStatus::Agreement
        } else {
            if self.config.verbose {
                info!(word1, word2, %config, verdict = %run.verdict, "inconclusive run");
            } else {
                debug!(word1, word2, %config, verdict = %run.verdict, "inconclusive run");
            }
            TestStatus::Inconclusive
        };
        outcome.verdict = Some(run.verdict);
        outcome
    }
}
