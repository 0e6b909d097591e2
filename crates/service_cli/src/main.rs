//! Folio CLI - Monte Carlo Portfolio Risk from the Command Line
//!
//! This is the operational entry point for the folio risk engine.
//!
//! # Commands
//!
//! - `folio simulate --history <csv>` - Simulate a rebalanced portfolio and report its risk
//! - `folio compare --history <csv>` - Report the same portfolio under every market regime
//!
//! # Configuration
//!
//! Defaults are overridden by `folio.toml` (or `--config`), then by
//! `FOLIO_*` environment variables, then by flags. `RUST_LOG` overrides
//! the configured log level.

use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::PortfolioInputs;
use config::{CliArgs, OutputFormat};

/// Folio Monte Carlo portfolio risk CLI
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: folio.toml if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a rebalanced portfolio and report its risk
    Simulate {
        #[command(flatten)]
        run: RunArgs,

        /// Market regime (normal, bull, bear, volatile)
        #[arg(short, long)]
        scenario: Option<String>,

        /// Directory for sample path CSV export
        #[arg(short, long)]
        export_dir: Option<PathBuf>,

        /// Number of paths to export
        #[arg(long)]
        samples: Option<usize>,
    },

    /// Report the same portfolio under every market regime
    Compare {
        #[command(flatten)]
        run: RunArgs,
    },
}

/// Flags shared by every command
#[derive(Args)]
struct RunArgs {
    /// CSV price history (Date column followed by one column per ticker)
    #[arg(long)]
    history: PathBuf,

    /// Tickers to hold, comma separated [default: every column]
    #[arg(short, long, value_delimiter = ',')]
    tickers: Option<Vec<String>>,

    /// Target weights, comma separated, one per ticker [default: equal]
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    weights: Option<Vec<f64>>,

    /// First history date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last history date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Number of Monte Carlo paths [default: 1000]
    #[arg(short = 'n', long)]
    paths: Option<usize>,

    /// Number of daily steps [default: 252]
    #[arg(long)]
    steps: Option<usize>,

    /// Rebalance every this many steps [default: 21]
    #[arg(short, long)]
    rebalance: Option<usize>,

    /// Random seed [default: drawn from the OS]
    #[arg(long)]
    seed: Option<u64>,

    /// Terminal portfolio value goal [default: 1.2]
    #[arg(long)]
    target: Option<f64>,

    /// VaR/CVaR tail level [default: 0.05]
    #[arg(short, long)]
    level: Option<f64>,

    /// Output format [default: table]
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl RunArgs {
    fn inputs(&self) -> PortfolioInputs {
        PortfolioInputs {
            history: self.history.clone(),
            tickers: self.tickers.clone(),
            weights: self.weights.clone(),
            start: self.start,
            end: self.end,
        }
    }

    fn overrides(&self, cli: &Cli) -> CliArgs {
        CliArgs {
            config_file: cli.config.clone(),
            verbose: cli.verbose,
            paths: self.paths,
            steps: self.steps,
            rebalance: self.rebalance,
            seed: self.seed,
            target: self.target,
            level: self.level,
            format: self.format,
            ..CliArgs::default()
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (run, overrides) = match &cli.command {
        Commands::Simulate {
            run,
            scenario,
            samples,
            ..
        } => {
            let mut overrides = run.overrides(&cli);
            overrides.scenario = scenario.clone();
            overrides.samples = *samples;
            (run, overrides)
        }
        Commands::Compare { run } => (run, run.overrides(&cli)),
    };

    let config = config::build_config(&overrides).context("failed to build configuration")?;
    init_tracing(config.log_level.as_filter_str());
    debug!(?config, "Effective configuration");

    let inputs = run.inputs();
    match &cli.command {
        Commands::Simulate { export_dir, .. } => {
            commands::simulate::run(&inputs, &config, export_dir.as_deref())
                .context("simulate failed")?
        }
        Commands::Compare { .. } => {
            commands::compare::run(&inputs, &config).context("compare failed")?
        }
    }

    Ok(())
}
