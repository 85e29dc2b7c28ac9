//! Oracle modes and configurations

use crate::error::OracleError;
use crate::smt::StringBackend;
use crate::solver::Verdict;
use std::fmt;
use std::str::FromStr;

/// Which ground truth a formula is built to have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Minimal script with a known model
    Sat,
    /// Script one edit too short
    Unsat,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Sat, Mode::Unsat];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Sat => "sat",
            Mode::Unsat => "unsat",
        }
    }

    /// The answer a correct solver gives
    pub fn expected_verdict(&self) -> Verdict {
        match self {
            Mode::Sat => Verdict::Sat,
            Mode::Unsat => Verdict::Unsat,
        }
    }

    /// The only answer that counts as a solver bug
    pub fn wrong_verdict(&self) -> Verdict {
        match self {
            Mode::Sat => Verdict::Unsat,
            Mode::Unsat => Verdict::Sat,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sat" => Ok(Mode::Sat),
            "unsat" => Ok(Mode::Unsat),
            other => Err(OracleError::Configuration(format!(
                "unknown mode `{other}` (expected `sat` or `unsat`)"
            ))),
        }
    }
}

/// One (mode, backend) pair a case is run under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OracleConfig {
    pub mode: Mode,
    pub backend: StringBackend,
}

impl OracleConfig {
    pub fn new(mode: Mode, backend: StringBackend) -> Self {
        Self { mode, backend }
    }

    /// The search cycle: both modes on `seq`, then both on `z3str3`.
    pub fn all() -> Vec<OracleConfig> {
        Self::product(&Mode::ALL, &StringBackend::ALL)
    }

    /// Every combination, grouped by backend.
    pub fn product(modes: &[Mode], backends: &[StringBackend]) -> Vec<OracleConfig> {
        backends
            .iter()
            .flat_map(|&backend| modes.iter().map(move |&mode| OracleConfig::new(mode, backend)))
            .collect()
    }
}

impl fmt::Display for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mode: {}, solver: {}", self.mode, self.backend)
    }
}
