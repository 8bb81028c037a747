//! CLI argument definitions for the salary guide.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use salary_cli::logging::LogFormat;
use salary_model::DEFAULT_BLEND_WEIGHT;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(
    name = "salary-guide",
    version,
    about = "Salary Guide - Project salary ranges for a target year",
    long_about = "Project low/mid/high salary ranges from survey baselines.\n\n\
                  Applies role growth, inflation, skills premiums, location and an\n\
                  experience adjustment, then blends the resulting candidate estimates."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include job description text in logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Project a salary range for a single request.
    Predict(PredictArgs),

    /// Project salary ranges for every row of a CSV file.
    Batch(BatchArgs),

    /// Run the built-in example requests.
    Demo(DemoArgs),

    /// Show the baseline table and factor summary.
    Tables(TablesArgs),

    /// Verify a standards directory and print a JSON report.
    Doctor(DoctorArgs),
}

#[derive(Parser)]
pub struct PredictArgs {
    /// Role title, e.g. "Cloud Security Engineer".
    #[arg(long = "role")]
    pub role: String,

    /// Seniority, e.g. "Entry", "Mid", "Senior", "Principal".
    #[arg(long = "level", default_value = "mid")]
    pub level: String,

    /// Years of professional experience.
    #[arg(long = "years", value_name = "YEARS", default_value_t = 0.0)]
    pub years: f64,

    /// Location code such as CA, NY or REMOTE.
    #[arg(long = "location", default_value = "REMOTE")]
    pub location: String,

    /// Skill or certification (repeatable, or comma separated).
    #[arg(long = "skill", value_name = "SKILL", value_delimiter = ',')]
    pub skills: Vec<String>,

    /// Free-text job description to mine for role, level and skills.
    #[arg(long = "description", value_name = "TEXT")]
    pub description: Option<String>,

    /// Print the full breakdown as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    #[command(flatten)]
    pub tables: TablesSource,

    #[command(flatten)]
    pub weights: WeightArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// CSV with columns role,level,years_experience,location,skills,description.
    #[arg(value_name = "INPUT_CSV")]
    pub input: PathBuf,

    #[command(flatten)]
    pub tables: TablesSource,

    #[command(flatten)]
    pub weights: WeightArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct DemoArgs {
    #[command(flatten)]
    pub tables: TablesSource,

    #[command(flatten)]
    pub weights: WeightArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser)]
pub struct TablesArgs {
    #[command(flatten)]
    pub tables: TablesSource,
}

#[derive(Parser)]
pub struct DoctorArgs {
    /// Standards directory (default: $SALARY_STANDARDS_DIR, then the bundled standards/).
    #[arg(long = "standards", value_name = "DIR")]
    pub standards: Option<PathBuf>,
}

/// Where lookup tables come from.
#[derive(Args, Clone, Default)]
pub struct TablesSource {
    /// Load tables from a verified standards directory instead of the
    /// built-in guide (falls back to $SALARY_STANDARDS_DIR when set).
    #[arg(long = "standards", value_name = "DIR")]
    pub standards: Option<PathBuf>,
}

/// Blend weights for the tunable signals, each in [0, 1].
#[derive(Args, Clone, Copy)]
pub struct WeightArgs {
    /// Pull toward the skills-adjusted estimate.
    #[arg(long = "w-skills", value_name = "W", default_value_t = DEFAULT_BLEND_WEIGHT)]
    pub skills: f64,

    /// Pull toward the skills- and location-adjusted estimate.
    #[arg(long = "w-geo", value_name = "W", default_value_t = DEFAULT_BLEND_WEIGHT)]
    pub geo: f64,

    /// Pull toward the experience-adjusted estimate.
    #[arg(long = "w-regression", value_name = "W", default_value_t = DEFAULT_BLEND_WEIGHT)]
    pub regression: f64,
}

#[derive(Args, Clone, Default)]
pub struct OutputArgs {
    /// Write breakdown rows to a CSV file.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Write full breakdowns to a JSON file.
    #[arg(long = "json-out", value_name = "PATH")]
    pub json: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
