//! Search orchestration
//!
//! Two ways of hunting for solver mistakes:
//! - Sweep: many random word pairs, each under one configuration of a fixed
//!   cycle, run on a bounded worker pool
//! - Retry: one word pair cycled through configurations until the solver
//!   contradicts the ground truth or a limit is reached

pub mod config;
pub mod parallel;
pub mod result;
pub mod retry;

pub use config::{RetryConfig, SweepConfig};
pub use parallel::{run_sweep, run_sweep_pairs, ParallelConfig, StopSignal};
pub use result::{RetryResult, RetryTermination, SessionStatistics, SweepResult};
pub use retry::retry_until_mismatch;
