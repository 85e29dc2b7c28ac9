//! Error types shared across the oracle

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, running or recording oracle formulas.
#[derive(Debug, Error)]
pub enum OracleError {
    /// Unknown backend or mode name, or a word the solver cannot represent.
    /// Fatal to the call, not the session.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The solver process could not be spawned, fed or reaped.
    #[error("solver error: {0}")]
    Solver(String),

    /// The operator definitions failed their startup regression formula.
    #[error("sanity check failed: solver answered `{verdict}` on the operator formula ({backend})")]
    SanityCheckFailure { backend: String, verdict: String },

    /// Words at edit distance zero admit no sub-minimal script.
    #[error("no unsat oracle exists for identical words `{0}`")]
    IdenticalWords(String),

    /// A script referenced a symbol with no ground-truth value.
    #[error("symbol `{0}` has no binding")]
    UnboundSymbol(String),

    /// A symbol was bound twice in the same table.
    #[error("symbol `{0}` is already bound")]
    DuplicateBinding(String),

    /// The bug log could not be appended.
    #[error("failed to append to mismatch log {path}: {source}")]
    MismatchLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OracleError>;
