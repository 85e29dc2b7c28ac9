use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use edit_oracle::oracle::{
    build_document, MismatchLog, Mode, OracleConfig, TestOutcome, TestStatus, Tester,
    TesterConfig, DEFAULT_LOG_FILE,
};
use edit_oracle::search::{
    retry_until_mismatch, run_sweep, ParallelConfig, RetryConfig, RetryTermination, StopSignal,
    SweepConfig,
};
use edit_oracle::smt::StringBackend;
use edit_oracle::solver::{SolverCommand, SolverDriver};
use edit_oracle::synthesis::TieBreak;
use edit_oracle::words::OfflineWords;
use edit_oracle::OracleError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Exit status of a session stopped by Ctrl-C
const INTERRUPTED_EXIT_CODE: i32 = 130;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "edit-oracle")]
#[command(about = "edit-oracle - differential tester for string SMT solvers")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// CLI mode selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliMode {
    /// Satisfiable formulas (minimal edit scripts)
    Sat,
    /// Unsatisfiable formulas (edit scripts one edit too short)
    Unsat,
    /// Both modes
    Both,
}

impl CliMode {
    fn modes(self) -> Vec<Mode> {
        match self {
            CliMode::Sat => vec![Mode::Sat],
            CliMode::Unsat => vec![Mode::Unsat],
            CliMode::Both => Mode::ALL.to_vec(),
        }
    }
}

/// CLI string backend selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliBackend {
    /// Sequence-based string solver
    Seq,
    /// z3str3 string solver
    Z3str3,
    /// Both backends
    Both,
}

impl CliBackend {
    fn backends(self) -> Vec<StringBackend> {
        match self {
            CliBackend::Seq => vec![StringBackend::Seq],
            CliBackend::Z3str3 => vec![StringBackend::Z3str3],
            CliBackend::Both => StringBackend::ALL.to_vec(),
        }
    }
}

/// CLI tie-break order for minimal scripts
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum CliTieBreak {
    /// Prefer replace, then insert, then remove
    #[default]
    ReplaceFirst,
    /// Prefer insert, then remove, then replace
    InsertFirst,
    /// Prefer remove, then insert, then replace
    RemoveFirst,
}

impl From<CliTieBreak> for TieBreak {
    fn from(cli: CliTieBreak) -> Self {
        match cli {
            CliTieBreak::ReplaceFirst => TieBreak::REPLACE_FIRST,
            CliTieBreak::InsertFirst => TieBreak::INSERT_FIRST,
            CliTieBreak::RemoveFirst => TieBreak::REMOVE_FIRST,
        }
    }
}

/// Options shared by the commands that run a solver
#[derive(ClapArgs, Debug)]
struct SolverOptions {
    /// Solver timeout in seconds
    #[arg(long, short, default_value = "30")]
    timeout: u64,
    /// Solver executable
    #[arg(long, default_value = "z3")]
    solver: PathBuf,
    /// Solver argument, repeatable (default: -in -smt2)
    #[arg(long = "solver-arg", allow_hyphen_values = true)]
    solver_args: Vec<String>,
    /// File mismatches are appended to
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    bug_log: PathBuf,
    /// Tie-break order for minimal scripts
    #[arg(long, value_enum, default_value = "replace-first")]
    tie_break: CliTieBreak,
    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

impl SolverOptions {
    fn command(&self) -> SolverCommand {
        let command = SolverCommand::default().with_program(&self.solver);
        if self.solver_args.is_empty() {
            command
        } else {
            command.with_args(self.solver_args.iter().cloned())
        }
    }

    fn tester(&self) -> Tester {
        Tester::new(
            SolverDriver::new(self.command()),
            TesterConfig::default()
                .with_timeout(Duration::from_secs(self.timeout))
                .with_verbose(self.verbose)
                .with_tie_break(self.tie_break.into()),
            Arc::new(MismatchLog::appending_to(&self.bug_log)),
        )
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Search for solver bugs with random word pairs
    Search {
        /// Number of word pairs to test
        #[arg(long, short, default_value = "5")]
        runs: usize,
        /// Base word length (longer words make the solver slower)
        #[arg(long, default_value = "5")]
        word_length: usize,
        /// Word lengths vary by up to this much around the base length
        #[arg(long, default_value = "1")]
        word_randomness: usize,
        /// Number of cases run in parallel
        #[arg(long, short = 'j')]
        jobs: Option<usize>,
        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        options: SolverOptions,
    },
    /// Try two given words under several configurations
    Try {
        /// First word
        word1: String,
        /// Second word
        word2: String,
        /// Mode(s) to run
        #[arg(long, short, value_enum, default_value = "both")]
        mode: CliMode,
        /// String backend(s) to run
        #[arg(long, short, value_enum, default_value = "both")]
        backend: CliBackend,
        /// Seed for the unsat mode
        #[arg(long)]
        seed: Option<u64>,
        /// Retry until the solver makes a mistake
        #[arg(long)]
        retry: bool,
        /// Give up retrying after this many solver runs
        #[arg(long, requires = "retry")]
        max_attempts: Option<u64>,
        /// Give up retrying after this many seconds
        #[arg(long, requires = "retry")]
        max_duration: Option<u64>,
        #[command(flatten)]
        options: SolverOptions,
    },
    /// Write the solver documents for two words without running a solver
    Log {
        /// First word
        word1: String,
        /// Second word
        word2: String,
        /// Mode(s) to write
        #[arg(long, short, value_enum, default_value = "both")]
        mode: CliMode,
        /// String backend(s) to write
        #[arg(long, short, value_enum, default_value = "z3str3")]
        backend: CliBackend,
        /// Seed for the unsat mode
        #[arg(long)]
        seed: Option<u64>,
        /// Tie-break order for minimal scripts
        #[arg(long, value_enum, default_value = "replace-first")]
        tie_break: CliTieBreak,
        /// Directory the documents are written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
}

// --- Reporting ---

fn init_tracing(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_outcome(label: &str, outcome: &TestOutcome, verbose: bool) {
    let verdict = outcome
        .verdict
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string());
    match outcome.status {
        TestStatus::Mismatch => {
            println!(
                "{}: MISMATCH {}, {} ({}) solver answered {}",
                label, outcome.word1, outcome.word2, outcome.config, verdict
            );
            if let Some(seed) = outcome.seed {
                println!("  replay with --seed {}", seed);
            }
        }
        TestStatus::Skipped => {
            println!(
                "{}: skipped {}, {} ({}): identical words",
                label, outcome.word1, outcome.word2, outcome.config
            );
        }
        TestStatus::Inconclusive if verbose => {
            println!(
                "{}: inconclusive {}, {} ({}): {}",
                label, outcome.word1, outcome.word2, outcome.config, verdict
            );
        }
        _ => {
            println!(
                "{}: {}, {} ({}) -> {}",
                label, outcome.word1, outcome.word2, outcome.config, verdict
            );
        }
    }
}

fn print_mismatch_total(tester: &Tester) {
    let log = tester.log();
    println!("Solver made {} mistakes", log.len());
    if let Some(path) = log.path().filter(|_| !log.is_empty()) {
        println!("Mismatches appended to \"{}\"", path.display());
    }
}

/// Raise `stop` on the first Ctrl-C so running cases finish and the summary
/// is printed. A second Ctrl-C exits at once.
fn stop_on_interrupt(stop: &StopSignal) {
    let stop = stop.clone();
    let installed = ctrlc::set_handler(move || {
        if stop.is_stopped() {
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        eprintln!("Interrupted, finishing running cases (Ctrl-C again to abort)");
        stop.stop();
    });
    if let Err(e) = installed {
        warn!("failed to install Ctrl-C handler: {e}");
    }
}

/// Word as a file name component: anything but letters, digits, `-` and `_`
/// becomes `_`, so a word can never name another directory.
fn file_component(word: &str) -> String {
    word.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Run the operator self-check, exiting with status 2 if it fails.
fn sanity_check_or_exit(tester: &Tester, backends: &[StringBackend]) {
    if let Err(e) = tester.sanity_check(backends) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }
}

// --- Commands ---

fn run_search(
    runs: usize,
    word_length: usize,
    word_randomness: usize,
    jobs: Option<usize>,
    seed: Option<u64>,
    options: &SolverOptions,
) {
    let tester = Arc::new(options.tester());
    let config = SweepConfig::default()
        .with_runs(runs)
        .with_word_length(word_length)
        .with_length_jitter(word_randomness)
        .with_seed_option(seed);
    let parallel_config = ParallelConfig::default().with_workers_option(jobs);
    let stop = StopSignal::new();
    stop_on_interrupt(&stop);

    let mut backends: Vec<StringBackend> = Vec::new();
    for c in &config.configs {
        if !backends.contains(&c.backend) {
            backends.push(c.backend);
        }
    }
    sanity_check_or_exit(&tester, &backends);

    println!(
        "Running {} cases on {} workers",
        config.runs, parallel_config.num_workers
    );

    let mut completed = 0;
    let result = run_sweep(
        Arc::clone(&tester),
        &mut OfflineWords::new(seed),
        &config,
        &parallel_config,
        &stop,
        |outcome| {
            completed += 1;
            print_outcome(&format!("run {}", completed), outcome, options.verbose);
        },
    );

    println!();
    print!("{}", result.statistics.format_summary());
    print_mismatch_total(&tester);
    if stop.is_stopped() {
        println!("Cancelled");
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_try(
    word1: &str,
    word2: &str,
    mode: CliMode,
    backend: CliBackend,
    seed: Option<u64>,
    retry: bool,
    max_attempts: Option<u64>,
    max_duration: Option<u64>,
    options: &SolverOptions,
) {
    let tester = options.tester();
    let stop = StopSignal::new();
    stop_on_interrupt(&stop);
    let backends = backend.backends();
    let configs = OracleConfig::product(&mode.modes(), &backends);

    sanity_check_or_exit(&tester, &backends);
    println!("Words: {}, {}", word1, word2);

    if retry {
        println!("Retrying until the solver makes a mistake");
        let config = RetryConfig::default()
            .with_configs(configs)
            .with_max_attempts_option(max_attempts)
            .with_max_duration_option(max_duration.map(Duration::from_secs))
            .with_seed_option(seed);
        let mut attempt = 0;
        let result = retry_until_mismatch(
            &tester,
            word1,
            word2,
            &config,
            &stop,
            |outcome| {
                attempt += 1;
                print_outcome(&format!("attempt {}", attempt), outcome, options.verbose);
            },
        );
        match result.termination {
            RetryTermination::Mismatch(_) => {
                println!("Found a mistake after {} attempts", attempt)
            }
            RetryTermination::AttemptLimit => println!("Gave up after {} attempts", attempt),
            RetryTermination::Deadline => {
                println!("Time limit reached after {} attempts", attempt)
            }
            RetryTermination::Cancelled => println!("Cancelled after {} attempts", attempt),
        }
    } else {
        for config in configs {
            if stop.is_stopped() {
                println!("Cancelled");
                break;
            }
            let outcome = tester.run_case(word1, word2, config, seed);
            print_outcome("try", &outcome, options.verbose);
        }
    }

    print_mismatch_total(&tester);
    if stop.is_stopped() {
        std::process::exit(INTERRUPTED_EXIT_CODE);
    }
}

#[allow(clippy::too_many_arguments)]
fn run_log(
    word1: &str,
    word2: &str,
    mode: CliMode,
    backend: CliBackend,
    seed: Option<u64>,
    tie_break: TieBreak,
    output_dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;
    for config in OracleConfig::product(&mode.modes(), &backend.backends()) {
        let case = match build_document(word1, word2, config, seed, tie_break) {
            Ok(case) => case,
            Err(OracleError::IdenticalWords(_)) => {
                println!("Skipping {}: identical words have no unsat formula", config);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let path = output_dir.join(format!(
            "{}_{}_{}_{}.smt2",
            file_component(word1),
            file_component(word2),
            config.mode,
            config.backend
        ));
        fs::write(&path, &case.document)?;
        println!("; {} ({})", path.display(), config);
        if let Some(seed) = case.seed {
            println!("; seed {}", seed);
        }
        println!("{}", case.document);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    match args.command {
        Commands::Search {
            runs,
            word_length,
            word_randomness,
            jobs,
            seed,
            options,
        } => {
            init_tracing(options.verbose);
            run_search(runs, word_length, word_randomness, jobs, seed, &options);
        }
        Commands::Try {
            word1,
            word2,
            mode,
            backend,
            seed,
            retry,
            max_attempts,
            max_duration,
            options,
        } => {
            init_tracing(options.verbose);
            run_try(
                &word1,
                &word2,
                mode,
                backend,
                seed,
                retry,
                max_attempts,
                max_duration,
                &options,
            );
        }
        Commands::Log {
            word1,
            word2,
            mode,
            backend,
            seed,
            tie_break,
            output_dir,
        } => {
            init_tracing(false);
            if let Err(e) = run_log(
                &word1,
                &word2,
                mode,
                backend,
                seed,
                tie_break.into(),
                &output_dir,
            ) {
                eprintln!("Error writing documents: {}", e);
                std::process::exit(1);
            }
        }
    }
}
