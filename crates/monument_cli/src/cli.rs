use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

/// Top-level parser for the `monumentd` binary.
#[derive(Debug, Parser)]
#[command(name = "monumentd", version, about = "Geodetic monument registry service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file
    #[arg(
        long,
        global = true,
        env = "MONUMENT_DB_PATH",
        default_value = "monuments.sqlite3"
    )]
    pub db_path: PathBuf,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "MONUMENT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files (stderr when unset)
    #[arg(long, global = true, env = "MONUMENT_LOG_DIR")]
    pub log_dir: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Load a survey dataset into the registry
    Populate {
        /// JSON array of survey rows
        #[arg(long, env = "MONUMENT_SEED_FILE")]
        seed_file: PathBuf,
    },
    /// Apply pending schema migrations and print the schema version
    Migrate,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "MONUMENT_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Survey dataset served by `GET /populate`
    #[arg(long, env = "MONUMENT_SEED_FILE")]
    pub seed_file: Option<PathBuf>,

    /// Allowed browser origin; repeat or comma-separate (any origin when unset)
    #[arg(
        long = "cors-origin",
        env = "MONUMENT_CORS_ORIGINS",
        value_delimiter = ','
    )]
    pub cors_origins: Vec<String>,
}
