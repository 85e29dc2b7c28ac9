//! Configuration for parallel sweep execution.

/// Configuration for parallel sweep execution.
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Number of worker threads, and so of live solver processes.
    pub num_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get().max(1),
        }
    }
}

impl ParallelConfig {
    /// Set the number of workers (at least one).
    pub fn with_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers.max(1);
        self
    }

    /// Set the number of workers from an Option, keeping the default on `None`.
    pub fn with_workers_option(self, num_workers: Option<usize>) -> Self {
        match num_workers {
            Some(n) => self.with_workers(n),
            None => self,
        }
    }
}
