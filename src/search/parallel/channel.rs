//! Job and result channels for parallel sweep workers.

use crate::oracle::{OracleConfig, TestOutcome};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One case handed to a worker.
#[derive(Debug, Clone)]
pub struct Job {
    pub index: usize,
    pub word1: String,
    pub word2: String,
    pub config: OracleConfig,
    pub seed: Option<u64>,
}

/// Message sent from workers to the coordinator.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    /// A case finished.
    Outcome { worker_id: usize, index: usize, outcome: TestOutcome },
    /// Worker has drained the job queue.
    Finished { worker_id: usize, cases_run: u64 },
}

/// Shared flag telling workers and loops to stop picking up work.
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal every holder to stop.
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Check if we should stop.
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Channel endpoints for a worker.
pub struct WorkerChannels {
    /// Jobs to run; shared by every worker.
    pub jobs: Receiver<Job>,
    /// Send messages to coordinator.
    pub to_coordinator: Sender<WorkerMessage>,
}

/// Channel endpoints for the coordinator.
pub struct CoordinatorChannels {
    /// Queue jobs; blocks while `num_workers` jobs are waiting.
    pub jobs: Sender<Job>,
    /// Receive messages from workers.
    pub from_workers: Receiver<WorkerMessage>,
}

/// Create channels for a sweep with the given number of workers.
pub fn create_channels(num_workers: usize) -> (CoordinatorChannels, Vec<WorkerChannels>) {
    // Bounded job queue: at most `num_workers` cases wait behind the running ones
    let (job_tx, job_rx) = bounded(num_workers.max(1));

    // Unbounded channel from workers to coordinator (workers shouldn't block)
    let (worker_tx, coordinator_rx) = unbounded();

    let workers = (0..num_workers)
        .map(|_| WorkerChannels {
            jobs: job_rx.clone(),
            to_coordinator: worker_tx.clone(),
        })
        .collect();

    let coordinator = CoordinatorChannels {
        jobs: job_tx,
        from_workers: coordinator_rx,
    };

    (coordinator, workers)
}
