//! Command-line surface of the `company` binary.
//!
//! Every flag can also come from the environment; flags win.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "company")]
#[command(about = "Company and employee registry service", version)]
pub struct Cli {
    /// Log level: trace, debug, info, warn or error.
    #[arg(long, global = true, env = "COMPANY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory for rotating log files; logs go to stderr when unset.
    #[arg(long, global = true, env = "COMPANY_LOG_DIR")]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the public API with both services hosted in this process.
    Serve {
        #[arg(long, env = "COMPANY_BIND", default_value = "127.0.0.1:8080")]
        bind: String,
        /// SQLite file; an in-memory store is used when unset.
        #[arg(long, env = "COMPANY_DB_PATH")]
        db_path: Option<PathBuf>,
        /// Load the demo company and employees before serving.
        #[arg(long)]
        seed: bool,
    },
    /// Host a single stateful service for gateways to call.
    Replica {
        #[arg(long, value_enum)]
        service: ReplicaKind,
        #[arg(long, env = "COMPANY_REPLICA_BIND", default_value = "127.0.0.1:8081")]
        bind: String,
        #[arg(long, env = "COMPANY_DB_PATH")]
        db_path: Option<PathBuf>,
    },
    /// Serve the public API, proxying to remote replicas.
    Gateway {
        #[arg(long, env = "COMPANY_BIND", default_value = "127.0.0.1:8080")]
        bind: String,
        #[arg(long, env = "COMPANY_SERVICE_URL")]
        company_url: String,
        #[arg(long, env = "EMPLOYER_SERVICE_URL")]
        employer_url: String,
    },
    /// Load the demo company and employees into a store file.
    Seed {
        #[arg(long, env = "COMPANY_DB_PATH")]
        db_path: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplicaKind {
    Company,
    Employer,
}
