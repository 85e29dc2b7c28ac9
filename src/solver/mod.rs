//! External solver process driver

pub mod config;
pub mod driver;
pub mod verdict;

pub use config::SolverCommand;
pub use driver::{SolverDriver, SolverRun};
pub use verdict::Verdict;
