//! CLI argument definitions for `prep`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use prep_model::ProcessingStep;

#[derive(Parser)]
#[command(
    name = "prep",
    version,
    about = "Upload CSV files to the preprocessing server and run its steps",
    long_about = "Upload a CSV file to the preprocessing server, run one of its steps \
                  (missing values, scaling, feature selection, SMOTE balancing) and \
                  show the results.\n\n\
                  Server address and defaults are read from settings.toml; see \
                  `prep config path`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Server root URL (overrides the settings file).
    #[arg(long, value_name = "URL", global = true)]
    pub server: Option<String>,

    /// Request timeout in seconds (overrides the settings file).
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a CSV file and show its preview.
    Upload(UploadArgs),

    /// Upload a CSV file, run one processing step and show the results.
    Process(ProcessArgs),

    /// Download a processed file from the server.
    Download(DownloadArgs),

    /// Show which steps have completed on the server.
    Status,

    /// List the processing steps.
    Steps,

    /// Inspect or create the settings file.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args)]
pub struct UploadArgs {
    /// CSV file to upload.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ProcessArgs {
    /// CSV file to upload before processing.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Step number (1-4) or name (missing-values, scaling, feature-selection, smote).
    #[arg(long, short, value_parser = parse_step)]
    pub step: ProcessingStep,

    /// Write the result chart to this path.
    #[arg(long = "save-chart", value_name = "PATH")]
    pub save_chart: Option<PathBuf>,

    /// Download the processed file into the download directory.
    #[arg(long)]
    pub download: bool,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// Output file as reported by the server; only its last path segment is used.
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: String,

    /// Directory to write into (overrides the settings file).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Copy)]
pub enum ConfigCommand {
    /// Print the settings file location.
    Path,
    /// Print the effective settings.
    Show,
    /// Write a settings file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
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

fn parse_step(value: &str) -> Result<ProcessingStep, String> {
    value.parse().map_err(|err: prep_model::ModelError| err.to_string())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn step_accepts_number_or_name() {
        let cli = Cli::try_parse_from(["prep", "process", "data.csv", "--step", "smote"]).unwrap();
        let Command::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(args.step, ProcessingStep::Smote);

        let cli = Cli::try_parse_from(["prep", "process", "data.csv", "-s", "2"]).unwrap();
        let Command::Process(args) = cli.command else {
            panic!("expected process");
        };
        assert_eq!(args.step, ProcessingStep::Scaling);
    }

    #[test]
    fn unknown_step_is_rejected() {
        assert!(Cli::try_parse_from(["prep", "process", "data.csv", "--step", "5"]).is_err());
    }

    #[test]
    fn global_server_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["prep", "status", "--server", "http://h:1"]).unwrap();
        assert_eq!(cli.server.as_deref(), Some("http://h:1"));
    }
}
