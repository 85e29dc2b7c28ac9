//! Configuration types for the search orchestrator

use crate::oracle::OracleConfig;
use std::time::Duration;

/// Configuration for an exhaustive sweep over random word pairs
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Number of word pairs to test
    pub runs: usize,
    /// Base word length
    pub word_length: usize,
    /// Each word's length is drawn from `word_length ± length_jitter`
    pub length_jitter: usize,
    /// Pair `i` runs under `configs[i % configs.len()]`
    pub configs: Vec<OracleConfig>,
    /// Seed for word lengths, word choice and unsat scripts (None = random)
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            runs: 5,
            word_length: 5,
            length_jitter: 1,
            configs: OracleConfig::all(),
            seed: None,
        }
    }
}

impl SweepConfig {
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_word_length(mut self, word_length: usize) -> Self {
        self.word_length = word_length;
        self
    }

    pub fn with_length_jitter(mut self, length_jitter: usize) -> Self {
        self.length_jitter = length_jitter;
        self
    }

    /// Set the configuration cycle; an empty list keeps the default cycle.
    pub fn with_configs(mut self, configs: Vec<OracleConfig>) -> Self {
        if !configs.is_empty() {
            self.configs = configs;
        }
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Configuration used for pair `index`. An empty cycle falls back to
    /// [`OracleConfig::all`].
    pub fn config_for(&self, index: usize) -> OracleConfig {
        if self.configs.is_empty() {
            let all = OracleConfig::all();
            return all[index % all.len()];
        }
        self.configs[index % self.configs.len()]
    }
}

/// Limits for retrying one pair until the solver makes a mistake
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Configurations cycled through, in order
    pub configs: Vec<OracleConfig>,
    /// Stop after this many solver runs (None = no limit)
    pub max_attempts: Option<u64>,
    /// Stop once this much time has passed (None = no limit)
    pub max_duration: Option<Duration>,
    /// Seed passed to every unsat attempt (None = fresh seed each time)
    pub seed: Option<u64>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            configs: OracleConfig::all(),
            max_attempts: None,
            max_duration: None,
            seed: None,
        }
    }
}

impl RetryConfig {
    /// Set the configuration cycle; an empty list keeps the default cycle.
    pub fn with_configs(mut self, configs: Vec<OracleConfig>) -> Self {
        if !configs.is_empty() {
            self.configs = configs;
        }
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_max_duration(mut self, max_duration: Duration) -> Self {
        self.max_duration = Some(max_duration);
        self
    }

    pub fn with_max_attempts_option(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_duration_option(mut self, max_duration: Option<Duration>) -> Self {
        self.max_duration = max_duration;
        self
    }

    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
