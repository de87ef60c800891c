use clap::{Parser, Subcommand, ValueEnum};
use quadrature::function::{BoundedFunction, Exp, Log};
use quadrature::integration::{
    StepSearchConfig, convergence_table, integrate, search_step, segment_count,
};
use quadrature::jobs::SyncMode;
use quadrature::session::{
    ConsoleSink, LogJobSampler, NullSink, ResultSink, SessionConfig, SessionReport,
    run_sequential, run_session,
};
use quadrature::sync::CancelToken;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "quad")]
#[command(about = "quad - fixed-step integration and producer/consumer job sessions")]
#[command(version)]
#[command(subcommand_required = true)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// CLI function selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliFunction {
    /// Exponential e^x
    Exp,
    /// Logarithm (base set with --base, natural by default)
    Log,
}

/// CLI slot synchronization selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliSyncMode {
    /// One mutex for reads and writes
    Exclusive,
    /// Reader/writer semaphore
    ReadWrite,
    /// Single-slot channel hand-off
    Channel,
}

impl From<CliSyncMode> for SyncMode {
    fn from(cli: CliSyncMode) -> Self {
        match cli {
            CliSyncMode::Exclusive => SyncMode::Exclusive,
            CliSyncMode::ReadWrite => SyncMode::ReadWrite,
            CliSyncMode::Channel => SyncMode::Channel,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Integrate a function with a fixed step
    Integrate {
        /// Function to integrate
        #[arg(long, value_enum, default_value = "exp")]
        function: CliFunction,
        /// Logarithm base (only used with --function log)
        #[arg(long)]
        base: Option<f64>,
        /// Left integration bound
        #[arg(long, allow_negative_numbers = true)]
        left: f64,
        /// Right integration bound
        #[arg(long, allow_negative_numbers = true)]
        right: f64,
        /// Integration step
        #[arg(long)]
        step: f64,
    },
    /// Search for a step meeting a target accuracy
    OptimalStep {
        #[arg(long, value_enum, default_value = "exp")]
        function: CliFunction,
        #[arg(long)]
        base: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        left: f64,
        #[arg(long, allow_negative_numbers = true)]
        right: f64,
        /// Target difference between successive estimates
        #[arg(long, default_value = "1e-7")]
        accuracy: f64,
        /// Step to start halving from
        #[arg(long, default_value = "0.1")]
        initial_step: f64,
        /// Give up after this many halvings
        #[arg(long, default_value = "40")]
        max_halvings: u32,
    },
    /// Integrate with several steps and compare against the exact value
    Table {
        #[arg(long, value_enum, default_value = "exp")]
        function: CliFunction,
        #[arg(long)]
        base: Option<f64>,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        left: f64,
        #[arg(long, default_value = "1", allow_negative_numbers = true)]
        right: f64,
        /// Steps to try
        #[arg(long, value_delimiter = ',', default_value = "0.5,0.1,0.01,0.001,0.0001")]
        steps: Vec<f64>,
    },
    /// Run a producer and a consumer thread over a shared job slot
    Run {
        /// Number of jobs to exchange
        #[arg(long, short = 'n', default_value = "100")]
        jobs: usize,
        /// How the shared slot is synchronized
        #[arg(long, value_enum, default_value = "read-write")]
        mode: CliSyncMode,
        /// Random seed for reproducible jobs
        #[arg(long)]
        seed: Option<u64>,
        /// Consumer sleep after each result, in milliseconds
        #[arg(long, default_value = "10")]
        pace_ms: u64,
        /// Consumer sleep on an empty slot, in milliseconds
        #[arg(long, default_value = "1")]
        idle_ms: u64,
        /// Producer sleep after each publish, in milliseconds
        #[arg(long)]
        producer_delay_ms: Option<u64>,
        /// Cancel both workers after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Do not print individual results
        #[arg(long, short)]
        quiet: bool,
    },
    /// Generate and integrate jobs on a single thread
    Sequential {
        #[arg(long, short = 'n', default_value = "100")]
        jobs: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, short)]
        quiet: bool,
    },
}

// --- Logging ---

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// --- Command Handlers ---

fn build_function(
    kind: CliFunction,
    base: Option<f64>,
) -> Result<Arc<dyn BoundedFunction>, Box<dyn std::error::Error>> {
    match kind {
        CliFunction::Exp => Ok(Arc::new(Exp)),
        CliFunction::Log => match base {
            None => Ok(Arc::new(Log::natural())),
            Some(b) => Log::new(b)
                .map(|log| Arc::new(log) as Arc<dyn BoundedFunction>)
                .ok_or_else(|| format!("Invalid logarithm base: {}", b).into()),
        },
    }
}

fn run_integrate(
    f: &dyn BoundedFunction,
    left: f64,
    right: f64,
    step: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = integrate(f, left, right, step)?;
    println!("Function: {}", f.name());
    println!("Interval: [{}, {}]", left, right);
    println!("Step: {} ({} segments)", step, segment_count(left, right, step));
    println!("Integral: {:.15}", value);
    if let Some(exact) = f.exact_integral(left, right) {
        println!("Exact: {:.15}", exact);
        println!("Error: {:.3e}", (value - exact).abs());
    }
    Ok(())
}

fn run_optimal_step(
    f: &dyn BoundedFunction,
    left: f64,
    right: f64,
    accuracy: f64,
    initial_step: f64,
    max_halvings: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = StepSearchConfig::default().with_max_halvings(max_halvings);
    let result = search_step(f, left, right, accuracy, initial_step, &config)?;

    println!("Function: {}", f.name());
    println!("Target accuracy: {:e}", accuracy);
    println!("Initial step: {}", initial_step);
    println!("Optimal step: {:.10}", result.step);
    println!("Halvings: {}", result.halvings);
    println!("Segments: {}", segment_count(left, right, result.step));
    println!("Integral: {:.15}", result.estimate);
    println!("Estimate difference: {:.3e}", result.difference());
    if let Some(exact) = f.exact_integral(left, right) {
        println!("Actual error: {:.3e}", (result.estimate - exact).abs());
    }
    Ok(())
}

fn run_table(
    f: &dyn BoundedFunction,
    left: f64,
    right: f64,
    steps: &[f64],
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = convergence_table(f, left, right, steps)?;

    println!("Function: {} on [{}, {}]", f.name(), left, right);
    if let Some(exact) = f.exact_integral(left, right) {
        println!("Exact value: {:.15}", exact);
    }
    println!("{:<12} {:<20} {:<14} {:<14}", "Step", "Integral", "Error", "Rel. error");
    for row in rows {
        let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.3e}", v));
        println!(
            "{:<12} {:<20.15} {:<14} {:<14}",
            row.step,
            row.value,
            fmt_opt(row.error),
            fmt_opt(row.relative_error)
        );
    }
    Ok(())
}

fn result_sink(quiet: bool) -> Arc<dyn ResultSink> {
    if quiet {
        Arc::new(NullSink)
    } else {
        Arc::new(ConsoleSink)
    }
}

fn print_session_report(report: &SessionReport) {
    println!("\nSession Statistics:");
    println!("  Sync mode: {}", report.sync_mode);
    println!("  Jobs: {}", report.job_count);
    println!("  Elapsed time: {:?}", report.elapsed);
    println!("  Published: {}", report.producer.published);
    println!("  Reads: {}", report.consumer.reads);
    println!("  Idle passes: {}", report.consumer.idle_passes);
    println!("  Results: {}", report.consumer.results);
    println!("  Failures: {}", report.consumer.failures);
    println!("  Delivery rate: {:.2}%", report.delivery_rate() * 100.0);
    println!("  Cancelled: {}", report.cancelled);
    println!("  Timed out: {}", report.timed_out);
}

fn run_threaded_session(
    config: &SessionConfig,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Running producer/consumer session...");
    println!("  Jobs: {}", config.job_count);
    println!("  Sync mode: {}", config.sync_mode);
    if let Some(seed) = config.seed {
        println!("  Seed: {}", seed);
    }

    let sampler = LogJobSampler::from_config(config)?;
    let report = run_session(config, sampler, result_sink(quiet), &CancelToken::new())?;
    print_session_report(&report);
    Ok(())
}

fn run_sequential_session(
    config: &SessionConfig,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Running sequential session...");
    println!("  Jobs: {}", config.job_count);

    let sampler = LogJobSampler::from_config(config)?;
    let sink = result_sink(quiet);
    let report = run_sequential(config, sampler, sink.as_ref(), &CancelToken::new());
    print_session_report(&report);
    Ok(())
}

// --- Main Function ---
fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let outcome: Result<(), Box<dyn std::error::Error>> = match args.command {
        Commands::Integrate {
            function,
            base,
            left,
            right,
            step,
        } => build_function(function, base)
            .and_then(|f| run_integrate(f.as_ref(), left, right, step)),
        Commands::OptimalStep {
            function,
            base,
            left,
            right,
            accuracy,
            initial_step,
            max_halvings,
        } => build_function(function, base).and_then(|f| {
            run_optimal_step(f.as_ref(), left, right, accuracy, initial_step, max_halvings)
        }),
        Commands::Table {
            function,
            base,
            left,
            right,
            steps,
        } => build_function(function, base).and_then(|f| run_table(f.as_ref(), left, right, &steps)),
        Commands::Run {
            jobs,
            mode,
            seed,
            pace_ms,
            idle_ms,
            producer_delay_ms,
            timeout_ms,
            quiet,
        } => {
            let config = SessionConfig::default()
                .with_job_count(jobs)
                .with_sync_mode(mode.into())
                .with_seed_option(seed)
                .with_pace_delay(Duration::from_millis(pace_ms))
                .with_idle_delay(Duration::from_millis(idle_ms))
                .with_producer_delay_option(producer_delay_ms.map(Duration::from_millis))
                .with_timeout_option(timeout_ms.map(Duration::from_millis));

            run_threaded_session(&config, quiet)
        }
        Commands::Sequential { jobs, seed, quiet } => {
            let config = SessionConfig::default()
                .with_job_count(jobs)
                .with_seed_option(seed);
            run_sequential_session(&config, quiet)
        }
    };

    match outcome {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
