//! Semantic mapping workstation CLI.

use clap::{ColorChoice, Parser};
use smap_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod picker;
mod summary;

use crate::cli::{Cli, Command, ConnectionsCommand, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_connect, run_connections_add, run_connections_delete, run_connections_list, run_map,
    run_search,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let base_url = cli.base_url.clone();
    let outcome = match cli.command {
        Command::Map(args) => run_map(&args, &base_url),
        Command::Connect(args) => run_connect(&args, &base_url),
        Command::Connections { command } => match command {
            ConnectionsCommand::List => run_connections_list(&base_url),
            ConnectionsCommand::Add(args) => run_connections_add(&args, &base_url),
            ConnectionsCommand::Delete { name, yes } => {
                run_connections_delete(&name, yes, &base_url)
            }
        },
        Command::Search(args) => run_search(&args, &base_url),
    };
    let exit_code = match outcome {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
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
