//! Retry one word pair until the solver makes a mistake

use crate::oracle::{TestOutcome, Tester};
use crate::search::config::RetryConfig;
use crate::search::parallel::StopSignal;
use crate::search::result::{RetryResult, RetryTermination, SessionStatistics};
use std::time::Instant;
use tracing::{debug, info};

/// Cycle through `config.configs` on `word1`/`word2` until a mismatch, the
/// stop signal, the attempt limit or the time limit, whichever comes first.
///
/// Limits are checked before each attempt, so a zero limit runs nothing. A
/// solver run already in progress is bounded by the tester's own timeout.
pub fn retry_until_mismatch(
    tester: &Tester,
    word1: &str,
    word2: &str,
    config: &RetryConfig,
    stop: &StopSignal,
    mut on_outcome: impl FnMut(&TestOutcome),
) -> RetryResult {
    let start_time = Instant::now();
    let mut statistics = SessionStatistics::default();
    let mut attempts: u64 = 0;

    info!(
        word1,
        word2,
        configs = config.configs.len(),
        "retrying until the solver makes a mistake"
    );

    let termination = loop {
        if stop.is_stopped() {
            break RetryTermination::Cancelled;
        }
        if config.max_attempts.is_some_and(|max| attempts >= max) {
            break RetryTermination::AttemptLimit;
        }
        if config
            .max_duration
            .is_some_and(|max| start_time.elapsed() >= max)
        {
            break RetryTermination::Deadline;
        }
        if config.configs.is_empty() {
            break RetryTermination::AttemptLimit;
        }

        let oracle_config = config.configs[attempts as usize % config.configs.len()];
        debug!(attempt = attempts + 1, %oracle_config, "retrying");
        let outcome = tester.run_case(word1, word2, oracle_config, config.seed);
        attempts += 1;
        statistics.record(&outcome);
        on_outcome(&outcome);

        if outcome.is_mismatch() {
            break RetryTermination::Mismatch(outcome);
        }
    };

    statistics.elapsed_time = start_time.elapsed();
    RetryResult {
        termination,
        statistics,
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::oracle::{MismatchLog, Mode, OracleConfig, TesterConfig};
    use crate::smt::StringBackend;
    use crate::solver::SolverDriver;
    use crate::test_support::{fake_solver, ALWAYS_SAT, ALWAYS_UNSAT};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    fn tester(dir: &TempDir, body: &str) -> Tester {
        Tester::new(
            SolverDriver::new(fake_solver(dir.path(), body)),
            TesterConfig::default().with_timeout(Duration::from_secs(10)),
            Arc::new(MismatchLog::in_memory()),
        )
    }

    #[test]
    fn test_stops_at_first_mismatch() {
        let dir = TempDir::new().unwrap();
        let tester = tester(&dir, ALWAYS_UNSAT);
        let config = RetryConfig::default().with_configs(vec![
            OracleConfig::new(Mode::Unsat, StringBackend::Seq),
            OracleConfig::new(Mode::Sat, StringBackend::Seq),
        ]);

        let stop = StopSignal::new();
        let result = retry_until_mismatch(&tester, "cat", "cats", &config, &stop, |_| {});
        assert!(result.found_mismatch());
        assert_eq!(result.statistics.runs, 2);
        assert_eq!(result.statistics.agreements, 1);
        match result.termination {
            RetryTermination::Mismatch(outcome) => assert_eq!(outcome.config.mode, Mode::Sat),
            other => panic!("unexpected termination {other:?}"),
        }
        assert_eq!(tester.log().len(), 1);
    }

    #[test]
    fn test_attempt_limit() {
        let dir = TempDir::new().unwrap();
        let tester = tester(&dir, ALWAYS_SAT);
        let config = RetryConfig::default()
            .with_configs(vec![OracleConfig::new(Mode::Sat, StringBackend::Z3str3)])
            .with_max_attempts(3);

        let mut observed = 0;
        let stop = StopSignal::new();
        let result =
            retry_until_mismatch(&tester, "cat", "dog", &config, &stop, |_| observed += 1);
        assert!(matches!(result.termination, RetryTermination::AttemptLimit));
        assert_eq!(result.statistics.runs, 3);
        assert_eq!(observed, 3);
    }

    #[test]
    fn test_deadline() {
        let dir = TempDir::new().unwrap();
        let tester = tester(&dir, ALWAYS_SAT);
        let config = RetryConfig::default()
            .with_configs(vec![OracleConfig::new(Mode::Sat, StringBackend::Seq)])
            .with_max_duration(Duration::from_millis(300));

        let start = Instant::now();
        let stop = StopSignal::new();
        let result = retry_until_mismatch(&tester, "cat", "dog", &config, &stop, |_| {});
        assert!(matches!(result.termination, RetryTermination::Deadline));
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_cancelled() {
        let dir = TempDir::new().unwrap();
        let tester = tester(&dir, ALWAYS_SAT);
        let stop = StopSignal::new();
        let observer_stop = stop.clone();

        let config = RetryConfig::default()
            .with_configs(vec![OracleConfig::new(Mode::Sat, StringBackend::Seq)]);

        let result =
            retry_until_mismatch(&tester, "cat", "dog", &config, &stop, |_| observer_stop.stop());
        assert!(matches!(result.termination, RetryTermination::Cancelled));
        assert_eq!(result.statistics.runs, 1);
    }
}
