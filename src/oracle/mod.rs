//! Differential oracle: modes, the tester and the mismatch log

pub mod log;
pub mod mode;
pub mod tester;

pub use log::{MismatchLog, MismatchRecord, DEFAULT_LOG_FILE};
pub use mode::{Mode, OracleConfig};
pub use tester::{build_document, CaseDocument, TestOutcome, TestStatus, Tester, TesterConfig};
