//! CLI configuration management
//!
//! Settings are layered from, lowest to highest priority:
//!
//! 1. Default values
//! 2. A TOML file (`folio.toml` in the working directory, or `--config`)
//! 3. `FOLIO_*` environment variables
//! 4. Command line flags

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use folio_engine::mc::{DEFAULT_BATCH_SIZE, DEFAULT_DT, MAX_PATHS, MAX_STEPS};
use folio_risk::orchestrator::{DEFAULT_LEVEL, DEFAULT_REBALANCE_STEP, DEFAULT_TARGET};
use serde::Deserialize;
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json")]
    InvalidFormat(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// Effective CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Number of simulated paths
    pub paths: usize,
    /// Number of time steps per path
    pub steps: usize,
    /// Time increment in years
    pub dt: f64,
    /// Paths per worker batch
    pub batch_size: usize,
    /// Rebalance every this many steps
    pub rebalance: usize,
    /// Master seed; drawn from the OS when absent
    pub seed: Option<u64>,
    /// Goal for the terminal portfolio value
    pub target: f64,
    /// VaR/CVaR tail level
    pub level: f64,
    /// Market regime name
    pub scenario: String,
    /// Report output format
    pub format: OutputFormat,
    /// Number of paths written by CSV export
    pub samples: usize,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            paths: 1000,
            steps: 252,
            dt: DEFAULT_DT,
            batch_size: DEFAULT_BATCH_SIZE,
            rebalance: DEFAULT_REBALANCE_STEP,
            seed: None,
            target: DEFAULT_TARGET,
            level: DEFAULT_LEVEL,
            scenario: "normal".to_string(),
            format: OutputFormat::Table,
            samples: 100,
        }
    }
}

impl FolioConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Apply `FOLIO_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, keyed by environment variable name
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("FOLIO_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }
        if let Some(value) = lookup("FOLIO_PATHS") {
            self.paths = parse_env("FOLIO_PATHS", &value)?;
        }
        if let Some(value) = lookup("FOLIO_STEPS") {
            self.steps = parse_env("FOLIO_STEPS", &value)?;
        }
        if let Some(value) = lookup("FOLIO_DT") {
            self.dt = parse_env("FOLIO_DT", &value)?;
        }
        if let Some(value) = lookup("FOLIO_BATCH_SIZE") {
            self.batch_size = parse_env("FOLIO_BATCH_SIZE", &value)?;
        }
        if let Some(value) = lookup("FOLIO_REBALANCE") {
            self.rebalance = parse_env("FOLIO_REBALANCE", &value)?;
        }
        if let Some(value) = lookup("FOLIO_SEED") {
            self.seed = Some(parse_env("FOLIO_SEED", &value)?);
        }
        if let Some(value) = lookup("FOLIO_TARGET") {
            self.target = parse_env("FOLIO_TARGET", &value)?;
        }
        if let Some(value) = lookup("FOLIO_LEVEL") {
            self.level = parse_env("FOLIO_LEVEL", &value)?;
        }
        if let Some(value) = lookup("FOLIO_SCENARIO") {
            self.scenario = value;
        }
        if let Some(value) = lookup("FOLIO_FORMAT") {
            self.format = value.parse::<OutputFormat>()?;
        }
        if let Some(value) = lookup("FOLIO_SAMPLES") {
            self.samples = parse_env("FOLIO_SAMPLES", &value)?;
        }
        Ok(self)
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(paths) = cli.paths {
            self.paths = paths;
        }
        if let Some(steps) = cli.steps {
            self.steps = steps;
        }
        if let Some(rebalance) = cli.rebalance {
            self.rebalance = rebalance;
        }
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if let Some(target) = cli.target {
            self.target = target;
        }
        if let Some(level) = cli.level {
            self.level = level;
        }
        if let Some(scenario) = &cli.scenario {
            self.scenario = scenario.clone();
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if let Some(samples) = cli.samples {
            self.samples = samples;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths == 0 || self.paths > MAX_PATHS {
            return Err(invalid("paths", format!("{} not in [1, {}]", self.paths, MAX_PATHS)));
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(invalid("steps", format!("{} not in [1, {}]", self.steps, MAX_STEPS)));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(invalid("dt", format!("{} must be positive", self.dt)));
        }
        if self.batch_size == 0 {
            return Err(invalid("batch_size", "must be at least 1".to_string()));
        }
        if self.rebalance == 0 {
            return Err(invalid("rebalance", "must be at least 1".to_string()));
        }
        if !self.target.is_finite() {
            return Err(invalid("target", format!("{} is not finite", self.target)));
        }
        if !(0.0..=1.0).contains(&self.level) {
            return Err(invalid("level", format!("{} not in [0, 1]", self.level)));
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvError(format!("{}={} could not be parsed", key, value)))
}

fn invalid(key: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidValue { key, reason }
}

/// Overrides taken from the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Raise the log level to debug
    pub verbose: bool,
    pub paths: Option<usize>,
    pub steps: Option<usize>,
    pub rebalance: Option<usize>,
    pub seed: Option<u64>,
    pub target: Option<f64>,
    pub level: Option<f64>,
    pub scenario: Option<String>,
    pub format: Option<OutputFormat>,
    pub samples: Option<usize>,
}

/// Build configuration from all sources
///
/// An explicit `--config` file must exist; the default `folio.toml` is
/// optional.
pub fn build_config(cli: &CliArgs) -> Result<FolioConfig, ConfigError> {
    let config = match &cli.config_file {
        Some(path) => FolioConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                FolioConfig::from_file(default_path)?
            } else {
                FolioConfig::default()
            }
        }
    };

    let mut config = config.with_env_override()?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
