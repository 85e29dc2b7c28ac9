//! Parallel sweep coordinator that manages worker threads.

use crate::oracle::{TestOutcome, Tester};
use crate::search::config::SweepConfig;
use crate::search::parallel::channel::{
    create_channels, CoordinatorChannels, Job, StopSignal, WorkerChannels, WorkerMessage,
};
use crate::search::parallel::config::ParallelConfig;
use crate::search::result::{SessionStatistics, SweepResult};
use crate::words::WordSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Draw `config.runs` word pairs from `source` and test them in parallel.
///
/// Word lengths are `word_length ± length_jitter` (never below one). With a
/// seed, the lengths and every unsat script are reproducible.
pub fn run_sweep(
    tester: Arc<Tester>,
    source: &mut dyn WordSource,
    config: &SweepConfig,
    parallel_config: &ParallelConfig,
    stop: &StopSignal,
    on_outcome: impl FnMut(&TestOutcome),
) -> SweepResult {
    let jobs = build_jobs(source, config);
    run_jobs(tester, jobs, parallel_config, stop, on_outcome)
}

/// Test the given pairs in parallel; pair `i` runs under `config.config_for(i)`.
pub fn run_sweep_pairs(
    tester: Arc<Tester>,
    pairs: &[(String, String)],
    config: &SweepConfig,
    parallel_config: &ParallelConfig,
    stop: &StopSignal,
    on_outcome: impl FnMut(&TestOutcome),
) -> SweepResult {
    let mut rng = config.seed.map(ChaCha8Rng::seed_from_u64);
    let jobs = pairs
        .iter()
        .enumerate()
        .map(|(index, (word1, word2))| Job {
            index,
            word1: word1.clone(),
            word2: word2.clone(),
            config: config.config_for(index),
            seed: rng.as_mut().map(|rng| rng.random()),
        })
        .collect();
    run_jobs(tester, jobs, parallel_config, stop, on_outcome)
}

fn build_jobs(source: &mut dyn WordSource, config: &SweepConfig) -> Vec<Job> {
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed.unwrap_or_else(|| rand::rng().random()));
    let jitter = config.length_jitter as i64;
    let mut word = |rng: &mut ChaCha8Rng| {
        let length = (config.word_length as i64 + rng.random_range(-jitter..=jitter)).max(1);
        source
            .generate(Some(length as usize), 1)
            .into_iter()
            .next()
            .unwrap_or_default()
    };

    (0..config.runs)
        .map(|index| {
            let word1 = word(&mut rng);
            let word2 = word(&mut rng);
            let seed = rng.random();
            Job {
                index,
                word1,
                word2,
                config: config.config_for(index),
                seed: config.seed.map(|_| seed),
            }
        })
        .collect()
}

fn run_jobs(
    tester: Arc<Tester>,
    jobs: Vec<Job>,
    parallel_config: &ParallelConfig,
    stop: &StopSignal,
    on_outcome: impl FnMut(&TestOutcome),
) -> SweepResult {
    let start_time = Instant::now();
    let total_jobs = jobs.len();
    let num_workers = parallel_config.num_workers.max(1).min(total_jobs.max(1));

    let (coordinator_channels, worker_channels) = create_channels(num_workers);
    let CoordinatorChannels { jobs: job_tx, from_workers } = coordinator_channels;

    info!(cases = total_jobs, workers = num_workers, "starting sweep");

    // Feed jobs from a separate thread so outcomes are reported as they arrive
    let feeder = {
        let stop = stop.clone();
        std::thread::spawn(move || {
            for job in jobs {
                if stop.is_stopped() || job_tx.send(job).is_err() {
                    break;
                }
            }
        })
    };

    let worker_handles: Vec<_> = worker_channels
        .into_iter()
        .enumerate()
        .map(|(worker_id, channels)| {
            let tester = Arc::clone(&tester);
            let stop = stop.clone();
            std::thread::spawn(move || run_worker(worker_id, &tester, &stop, channels))
        })
        .collect();

    let mut result = run_coordinator(from_workers, num_workers, on_outcome);

    let _ = feeder.join();
    for handle in worker_handles {
        let _ = handle.join();
    }

    result.statistics.elapsed_time = start_time.elapsed();
    result.cancelled = stop.is_stopped() && (result.statistics.runs as usize) < total_jobs;
    result
}

/// Coordinator loop that receives outcomes from workers and aggregates them.
fn run_coordinator(
    from_workers: crossbeam_channel::Receiver<WorkerMessage>,
    total_workers: usize,
    mut on_outcome: impl FnMut(&TestOutcome),
) -> SweepResult {
    let mut statistics = SessionStatistics::default();
    let mut mismatches = Vec::new();
    let mut finished_count = 0;

    // Ends when every worker finished or all senders dropped
    while let Ok(msg) = from_workers.recv() {
        match msg {
            WorkerMessage::Outcome {
                worker_id,
                index,
                outcome,
            } => {
                debug!(worker_id, index, status = ?outcome.status, "case finished");
                statistics.record(&outcome);
                on_outcome(&outcome);
                if outcome.is_mismatch() {
                    mismatches.push(outcome);
                }
            }
            WorkerMessage::Finished {
                worker_id,
                cases_run,
            } => {
                debug!(worker_id, cases_run, "worker finished");
                finished_count += 1;
                if finished_count >= total_workers {
                    break;
                }
            }
        }
    }

    SweepResult {
        statistics,
        mismatches,
        cancelled: false,
    }
}

/// Worker function that runs cases until the queue closes or the sweep stops.
fn run_worker(worker_id: usize, tester: &Tester, stop: &StopSignal, channels: WorkerChannels) {
    let mut cases_run = 0;
    while !stop.is_stopped() {
        let Ok(job) = channels.jobs.recv() else {
            break;
        };
        let outcome = tester.run_case(&job.word1, &job.word2, job.config, job.seed);
        cases_run += 1;
        let _ = channels.to_coordinator.send(WorkerMessage::Outcome {
            worker_id,
            index: job.index,
            outcome,
        });
    }

    let _ = channels.to_coordinator.send(WorkerMessage::Finished {
        worker_id,
        cases_run,
    });
}
