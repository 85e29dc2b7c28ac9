//! Parallel sweep execution over a bounded worker pool.
//!
//! # Architecture
//!
//! - A **feeder** thread pushes jobs into a bounded queue, so at most
//!   `2 * num_workers` cases are in flight and at most `num_workers` solver
//!   processes are alive
//! - **Workers** pull jobs, run them through the shared [`Tester`] and report
//!   each outcome
//! - The **coordinator** aggregates statistics and invokes the caller's
//!   observer as outcomes arrive
//! - A [`StopSignal`] cancels queued work
//!
//! # Example
//!
//! ```ignore
//! use edit_oracle::search::parallel::{run_sweep, ParallelConfig, StopSignal};
//!
//! let result = run_sweep(
//!     tester,
//!     &mut OfflineWords::new(Some(42)),
//!     &SweepConfig::default().with_runs(100),
//!     &ParallelConfig::default().with_workers(4),
//!     &StopSignal::new(),
//!     |outcome| println!("{:?}", outcome.status),
//! );
//! ```
//!
//! [`Tester`]: crate::oracle::Tester

pub mod channel;
pub mod config;
pub mod coordinator;

pub use channel::StopSignal;
pub use config::ParallelConfig;
pub use coordinator::{run_sweep, run_sweep_pairs};
