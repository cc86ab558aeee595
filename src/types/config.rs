//! Configuration structures for the assembly line simulator
//!
//! This module contains the experiment configuration, its layered loading
//! (defaults, JSON file, command line), and validation logic.

use super::{ExperimentKind, OutputFormat};
use crate::model::{Calibration, DEFAULT_MACHINE_COUNT, SECONDS_PER_DAY, SECONDS_PER_YEAR};
use crate::simulation::DEFAULT_MAX_ITERATIONS;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Reference production figures used by the planning experiments
pub mod production {
    /// Semiconductors manufactured worldwide during 2021
    pub const ANNUAL_TOTAL_2021: u64 = 1_140_000_000_000;

    /// Natural yearly growth of production (6.25%)
    pub const ANNUAL_GROWTH_RATE: f64 = 0.0625;

    /// Years the growth plan covers
    pub const GROWTH_YEARS: u32 = 5;

    /// Independent searches averaged per estimate
    pub const AVERAGING_RUNS: usize = 10;

    /// Factory-count increment of the annual capacity search
    pub const ANNUAL_STEP: u64 = 500;

    /// Factory-count increment of each growth-plan year
    pub const GROWTH_STEP: u64 = 50;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "assembly-line-sim",
    version = "0.1.0",
    override_usage = "assembly-line-sim [-1] [-2] [-3] [OPTIONS]",
    about = "Assembly Line Simulator - Monte Carlo throughput and capacity planning for a semiconductor assembly line",
    long_about = "Estimates the output of a semiconductor assembly line from a calibrated regression model and solves for the number of factories needed to meet a production target.

EXPERIMENTS:
    -1    Validate the model against the published observations
    -2    Factories needed to manufacture 1.14 trillion semiconductors in a year
    -3    Factories to build every year to keep up with 6.25% growth

    With no experiment flag, all three run.

EXAMPLES:
    # Run every experiment
    assembly-line-sim

    # Only the validation, reproducibly
    assembly-line-sim -1 --seed 42

    # Capacity estimate averaged over 3 runs, as JSON
    assembly-line-sim -2 --runs 3 --output-format json

    # Generate configuration template
    assembly-line-sim --print-config > my-config.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Run experiment 1 (validation)
    #[arg(short = '1', help = "Run experiment 1 (model validation)")]
    pub experiment_1: bool,

    /// Run experiment 2 (annual capacity)
    #[arg(short = '2', help = "Run experiment 2 (annual capacity)")]
    pub experiment_2: bool,

    /// Run experiment 3 (growth plan)
    #[arg(short = '3', help = "Run experiment 3 (growth plan)")]
    pub experiment_3: bool,

    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Independent searches averaged per estimate
    #[arg(
        long,
        help = "Searches averaged per estimate",
        long_help = "Number of independent capacity searches averaged per estimate. Must be greater than 0. Default: 10"
    )]
    pub runs: Option<usize>,

    /// Machines per stage in every factory
    #[arg(long, help = "Machines per stage in every factory")]
    pub machines: Option<u32>,

    /// Output format for reports
    #[arg(
        long,
        help = "Output format (text or json)",
        long_help = "Output format for experiment reports. Supported formats: text, json. Default: text"
    )]
    pub output_format: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running experiments
    #[arg(long, help = "Validate configuration without running experiments")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

impl CliArgs {
    /// Experiments selected by `-1`, `-2`, `-3`; all of them when none is given
    pub fn selected_experiments(&self) -> Vec<ExperimentKind> {
        let flags = [
            (self.experiment_1, ExperimentKind::Validation),
            (self.experiment_2, ExperimentKind::AnnualCapacity),
            (self.experiment_3, ExperimentKind::GrowthPlan),
        ];

        let selected: Vec<ExperimentKind> =
            flags.iter().filter(|(on, _)| *on).map(|(_, kind)| *kind).collect();

        if selected.is_empty() {
            ExperimentKind::ALL.to_vec()
        } else {
            selected
        }
    }
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Machines per stage in every factory
    pub machine_count: Option<u32>,

    /// Working window of one validation observation (seconds)
    pub validation_window_seconds: Option<f64>,

    /// Working window of the planning experiments (seconds)
    pub planning_window_seconds: Option<f64>,

    /// Independent searches averaged per estimate
    pub averaging_runs: Option<usize>,

    /// Annual production target of experiment 2
    pub annual_target: Option<u64>,

    /// Factory-count increment of experiment 2
    pub annual_step: Option<u64>,

    /// Yearly growth rate of experiment 3 (0.0-1.0)
    pub growth_rate: Option<f64>,

    /// Years covered by experiment 3
    pub growth_years: Option<u32>,

    /// Factory-count increment of experiment 3
    pub growth_step: Option<u64>,

    /// First factory count every search evaluates
    pub search_start: Option<u64>,

    /// Iteration cap of one search
    pub max_search_iterations: Option<usize>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output format for reports
    pub output_format: Option<String>,

    /// Calibration table of the throughput model
    pub calibration: Option<Calibration>,
}

/// Configuration for the simulator experiments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    /// Machines per stage in every factory
    pub machine_count: u32,

    /// Working window of one validation observation (seconds)
    pub validation_window_seconds: f64,

    /// Working window of the planning experiments (seconds)
    pub planning_window_seconds: f64,

    /// Independent searches averaged per estimate
    pub averaging_runs: usize,

    /// Annual production target of experiment 2
    pub annual_target: u64,

    /// Factory-count increment of experiment 2
    pub annual_step: u64,

    /// Yearly growth rate of experiment 3 (0.0-1.0)
    pub growth_rate: f64,

    /// Years covered by experiment 3
    pub growth_years: u32,

    /// Factory-count increment of experiment 3
    pub growth_step: u64,

    /// First factory count every search evaluates
    pub search_start: u64,

    /// Iteration cap of one search
    pub max_search_iterations: usize,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output format for reports
    pub output_format: String,

    /// Calibration table of the throughput model
    pub calibration: Calibration,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for experiment configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Machine count is invalid
    #[error("Machine count must be greater than 0, got {0}")]
    InvalidMachineCount(u32),

    /// Averaging run count is invalid
    #[error("Averaging runs must be greater than 0, got {0}")]
    InvalidAveragingRuns(usize),

    /// Search step is invalid
    #[error("Search step for {field} must be greater than 0")]
    InvalidStep {
        /// Name of the step field
        field: String,
    },

    /// Window is invalid
    #[error("Invalid window for {field}: {value} (must be positive and finite)")]
    InvalidWindow {
        /// Name of the window field
        field: String,
        /// The invalid window value
        value: f64,
    },

    /// Growth rate is invalid
    #[error("Invalid growth rate: {0} (must be between 0.0 and 1.0)")]
    InvalidGrowthRate(f64),

    /// Iteration cap is invalid
    #[error("Maximum search iterations must be greater than 0")]
    InvalidIterationCap,

    /// Output format is not recognised
    #[error("Unknown output format: {0}")]
    InvalidOutputFormat(String),

    /// Calibration table is unusable
    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            machine_count: DEFAULT_MACHINE_COUNT,
            validation_window_seconds: SECONDS_PER_DAY,
            planning_window_seconds: SECONDS_PER_YEAR,
            averaging_runs: production::AVERAGING_RUNS,
            annual_target: production::ANNUAL_TOTAL_2021,
            annual_step: production::ANNUAL_STEP,
            growth_rate: production::ANNUAL_GROWTH_RATE,
            growth_years: production::GROWTH_YEARS,
            growth_step: production::GROWTH_STEP,
            search_start: 0,
            max_search_iterations: DEFAULT_MAX_ITERATIONS,
            seed: None,
            output_format: "text".to_string(),
            calibration: Calibration::reference_study(),
        }
    }
}

impl ExperimentConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            machine_count: config_file.machine_count.unwrap_or(defaults.machine_count),
            validation_window_seconds: config_file
                .validation_window_seconds
                .unwrap_or(defaults.validation_window_seconds),
            planning_window_seconds: config_file
                .planning_window_seconds
                .unwrap_or(defaults.planning_window_seconds),
            averaging_runs: config_file.averaging_runs.unwrap_or(defaults.averaging_runs),
            annual_target: config_file.annual_target.unwrap_or(defaults.annual_target),
            annual_step: config_file.annual_step.unwrap_or(defaults.annual_step),
            growth_rate: config_file.growth_rate.unwrap_or(defaults.growth_rate),
            growth_years: config_file.growth_years.unwrap_or(defaults.growth_years),
            growth_step: config_file.growth_step.unwrap_or(defaults.growth_step),
            search_start: config_file.search_start.unwrap_or(defaults.search_start),
            max_search_iterations: config_file
                .max_search_iterations
                .unwrap_or(defaults.max_search_iterations),
            seed: config_file.seed.or(defaults.seed),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
            calibration: config_file.calibration.unwrap_or(defaults.calibration),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.runs {
            config.averaging_runs = value;
        }
        if let Some(value) = args.machines {
            config.machine_count = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.machine_count == 0 {
            return Err(ConfigValidationError::InvalidMachineCount(self.machine_count));
        }

        if self.averaging_runs == 0 {
            return Err(ConfigValidationError::InvalidAveragingRuns(self.averaging_runs));
        }

        if self.annual_step == 0 {
            return Err(ConfigValidationError::InvalidStep { field: "annual_step".to_string() });
        }
        if self.growth_step == 0 {
            return Err(ConfigValidationError::InvalidStep { field: "growth_step".to_string() });
        }

        self.validate_window("validation_window_seconds", self.validation_window_seconds)?;
        self.validate_window("planning_window_seconds", self.planning_window_seconds)?;

        if !(0.0..=1.0).contains(&self.growth_rate) {
            return Err(ConfigValidationError::InvalidGrowthRate(self.growth_rate));
        }

        if self.max_search_iterations == 0 {
            return Err(ConfigValidationError::InvalidIterationCap);
        }

        self.get_output_format().map_err(ConfigValidationError::InvalidOutputFormat)?;

        self.calibration
            .validate()
            .map_err(|e| ConfigValidationError::InvalidCalibration(e.to_string()))?;

        Ok(())
    }

    /// Helper method to validate window lengths
    fn validate_window(&self, field: &str, value: f64) -> Result<(), ConfigValidationError> {
        if !(value > 0.0 && value.is_finite()) {
            return Err(ConfigValidationError::InvalidWindow { field: field.to_string(), value });
        }
        Ok(())
    }

    /// Get the output format as an enum value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}
