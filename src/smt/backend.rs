//! String solver backend selection

use crate::error::OracleError;
use std::fmt;
use std::str::FromStr;

/// String theory engine the solver is told to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringBackend {
    /// Sequence-based solver (the solver's default)
    Seq,
    /// z3str3 word-equation solver
    Z3str3,
}

impl StringBackend {
    pub const ALL: [StringBackend; 2] = [StringBackend::Seq, StringBackend::Z3str3];

    pub fn name(&self) -> &'static str {
        match self {
            StringBackend::Seq => "seq",
            StringBackend::Z3str3 => "z3str3",
        }
    }

    /// The `set-option` line selecting this backend
    pub fn option_line(&self) -> String {
        format!("(set-option :smt.string_solver {})", self.name())
    }
}

impl fmt::Display for StringBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StringBackend {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seq" => Ok(StringBackend::Seq),
            "z3str3" => Ok(StringBackend::Z3str3),
            other => Err(OracleError::Configuration(format!(
                "unknown string solver `{other}` (expected `seq` or `z3str3`)"
            ))),
        }
    }
}
