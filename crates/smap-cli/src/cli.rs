//! CLI argument definitions for the mapping workstation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use smap_model::DatabaseKind;

#[derive(Parser)]
#[command(
    name = "smap",
    version,
    about = "Semantic mapping workstation - map relational schemas onto schema.org",
    long_about = "Map a relational schema (SQL file or saved database connection) onto\n\
                  schema.org classes, review and correct the proposed mapping, and export\n\
                  the result as SQL plus a JSON mapping report."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the workstation collaborator service.
    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = smap_client::DEFAULT_BASE_URL,
        global = true
    )]
    pub base_url: String,

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
}

#[derive(Subcommand)]
pub enum Command {
    /// Map an uploaded SQL file onto schema.org and export the artifact.
    Map(MapArgs),

    /// Map the schema behind a saved database connection.
    Connect(ConnectArgs),

    /// Manage saved connection profiles.
    Connections {
        #[command(subcommand)]
        command: ConnectionsCommand,
    },

    /// Search the semantic-class catalog directly.
    Search(SearchArgs),
}

#[derive(Parser)]
pub struct MapArgs {
    /// Path to the SQL schema file to upload.
    #[arg(value_name = "SQL_FILE")]
    pub sql_file: PathBuf,

    #[command(flatten)]
    pub run: RunArgs,
}

#[derive(Parser)]
pub struct ConnectArgs {
    /// Name of the saved connection profile.
    #[arg(value_name = "NAME")]
    pub name: String,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Options shared by the two pipeline-driving commands.
#[derive(Parser)]
pub struct RunArgs {
    /// Parent directory the export subfolder is created in
    /// (default: next to the source file, or the current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Review each record interactively before generation.
    #[arg(long = "review")]
    pub review: bool,

    /// Accept the default export folder name without prompting.
    #[arg(long = "yes", short = 'y')]
    pub assume_yes: bool,

    /// Stop after printing the mapping summary; skip generation and export.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum ConnectionsCommand {
    /// List saved connection profiles.
    List,

    /// Build and save a connection profile.
    Add(AddConnectionArgs),

    /// Delete a saved connection profile (asks for confirmation).
    Delete {
        /// Profile name.
        #[arg(value_name = "NAME")]
        name: String,

        /// Skip the confirmation prompt.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Parser)]
pub struct AddConnectionArgs {
    /// Profile name (saving under an existing name overwrites).
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Database dialect.
    #[arg(long = "type", value_enum, default_value = "sqlite")]
    pub kind: DatabaseKindArg,

    /// SQLite file path.
    #[arg(long = "path", value_name = "FILE")]
    pub path: Option<String>,

    /// Server host.
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Server port (omitted from the connection string when absent).
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<String>,

    /// Username.
    #[arg(long = "user", value_name = "USER")]
    pub username: Option<String>,

    /// Password.
    #[arg(long = "password", value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Database name.
    #[arg(long = "database", value_name = "DB")]
    pub database: Option<String>,

    /// Use this connection string verbatim, bypassing templating.
    #[arg(long = "connection-string", value_name = "STRING")]
    pub custom_string: Option<String>,
}

#[derive(Parser)]
pub struct SearchArgs {
    /// Search query (minimum two characters).
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Translate each result description.
    #[arg(long = "translate")]
    pub translate: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DatabaseKindArg {
    Sqlite,
    Postgresql,
    Mysql,
    Mssql,
}

impl From<DatabaseKindArg> for DatabaseKind {
    fn from(value: DatabaseKindArg) -> Self {
        match value {
            DatabaseKindArg::Sqlite => DatabaseKind::Sqlite,
            DatabaseKindArg::Postgresql => DatabaseKind::Postgres,
            DatabaseKindArg::Mysql => DatabaseKind::Mysql,
            DatabaseKindArg::Mssql => DatabaseKind::Mssql,
        }
    }
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
