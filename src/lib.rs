//! Differential testing oracle for string SMT solvers
//!
//! Builds formulas over single-character string edits whose satisfiability
//! is known by construction, runs them through an external solver under
//! several string backends and records every answer that contradicts the
//! ground truth.

pub mod edit;
pub mod error;
pub mod oracle;
pub mod search;
pub mod smt;
pub mod solver;
pub mod synthesis;
pub mod words;

#[cfg(all(test, unix))]
pub(crate) mod test_support;

pub use error::{OracleError, Result};
