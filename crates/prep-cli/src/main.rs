//! `prep`: command-line client for the CSV preprocessing server.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

use prep_cli::logging::{LogConfig, LogFormat, init_logging};
use prep_cli::render::Renderer;
use prep_cli::settings::{Settings, load_settings};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    RunContext, run_config, run_download, run_process, run_status, run_steps, run_upload,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let settings = settings_from_cli(&cli, load_settings());
    let mut renderer = Renderer::new(settings.display.table_width);
    if matches!(cli.color.color, ColorChoice::Never) {
        renderer = renderer.plain();
    }
    let ctx = RunContext { settings, renderer };

    let result = match &cli.command {
        Command::Upload(args) => run_upload(&ctx, args),
        Command::Process(args) => run_process(&ctx, args),
        Command::Download(args) => run_download(&ctx, args).map(|()| true),
        Command::Status => run_status(&ctx).map(|()| true),
        Command::Steps => run_steps(&ctx).map(|()| true),
        Command::Config(command) => run_config(&ctx, *command).map(|()| true),
    };
    let exit_code = match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Apply `--server` and `--timeout` on top of the settings file.
fn settings_from_cli(cli: &Cli, mut settings: Settings) -> Settings {
    if let Some(url) = &cli.server {
        settings.server.url.clone_from(url);
    }
    if let Some(secs) = cli.timeout {
        settings.server.timeout_secs = secs;
    }
    settings
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
