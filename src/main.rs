use std::path::PathBuf;
use clap::{Parser, ValueEnum};
use sumbench::bench::BenchmarkDriver;
use sumbench::config::{BenchConfig, InputKind};
use sumbench::error::{exit_code, user_friendly_message};
use sumbench::{Result, DEFAULT_RANDOM_MAX};
use tracing::debug;

/// Compare serial, multi-threaded and GPU summation of a large sequence
#[derive(Parser, Debug)]
#[command(name = "sumbench", version, about)]
struct Cli {
    /// Number of elements in the CPU input
    #[arg(short, long, value_name = "N")]
    size: Option<usize>,

    /// Thread counts for the parallel runs
    #[arg(short, long, value_delimiter = ',', value_name = "N,N,...")]
    threads: Option<Vec<usize>>,

    /// How to build the CPU input
    #[arg(long, value_enum, value_name = "KIND")]
    input: Option<InputArg>,

    /// Exclusive upper bound for random input (implies --input random)
    #[arg(long, value_name = "N")]
    max: Option<u32>,

    /// Seed for random input
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Skip the single-threaded baseline
    #[arg(long)]
    no_serial: bool,

    /// Fail if a parallel sum differs from the serial sum
    #[arg(long)]
    verify: bool,

    /// Also run the GPU strategy over N device-generated values.
    /// This build has no device backend, so the run fails unless an
    /// accelerator is supplied through the library API.
    #[arg(long, value_name = "N")]
    gpu_size: Option<usize>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn", value_name = "LEVEL")]
    log_level: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputArg {
    Consecutive,
    Random,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// Layer command-line overrides on top of the file configuration
    fn into_config(self, base: BenchConfig) -> BenchConfig {
        let mut config = base;

        if let Some(size) = self.size {
            config = config.with_sequence_len(size);
        }
        if let Some(threads) = self.threads {
            config = config.with_thread_counts(threads);
        }
        let current_max = match config.input {
            InputKind::Random { max } => Some(max),
            InputKind::Consecutive => None,
        };
        let max = self.max.or(current_max).unwrap_or(DEFAULT_RANDOM_MAX);
        let input = match (self.input, self.max, current_max) {
            (Some(InputArg::Consecutive), _, _) => InputKind::Consecutive,
            (Some(InputArg::Random), _, _) | (None, Some(_), _) | (None, None, Some(_)) => {
                InputKind::Random { max }
            }
            (None, None, None) => InputKind::Consecutive,
        };
        config = config.with_input(input);
        if self.seed.is_some() {
            config = config.with_seed(self.seed);
        }
        if self.no_serial {
            config = config.with_serial(false);
        }
        if self.verify {
            config = config.with_verify(true);
        }
        if self.gpu_size.is_some() {
            config = config.with_gpu_size(self.gpu_size);
        }

        config
    }
}

fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let base = match &cli.config {
        Some(path) => BenchConfig::load_from(path)?,
        None => BenchConfig::load()?,
    };
    let format = cli.format;
    let progress = cli.progress;
    let config = cli.into_config(base);
    debug!(?config, "resolved configuration");

    let driver = BenchmarkDriver::new(config)?;
    let report = if progress {
        driver.run_with_progress().await?
    } else {
        driver.run().await?
    };

    match format {
        OutputFormat::Text => {
            println!("{}", report.to_text());
            for line in report.speedup_lines() {
                println!("{}", line);
            }
        }
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("{}", user_friendly_message(&e));
        std::process::exit(exit_code(&e));
    }
}
