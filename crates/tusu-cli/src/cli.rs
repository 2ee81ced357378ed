//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Tusu - Spot overspending and see what the savings could earn
#[derive(Parser)]
#[command(name = "tusu")]
#[command(about = "Expense anomaly detection and investment recommendations", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path (spending history)
    #[arg(long, default_value = "tusu.db", global = true)]
    pub db: PathBuf,

    /// Analysis config file (defaults to the data-dir override or built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where category baselines come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BaselineMode {
    /// Placeholder table from the config
    Static,
    /// Averages of recorded months in the database
    History,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a month of transactions
    Analyze {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Baseline source
        #[arg(short, long, value_enum, default_value = "static")]
        baselines: BaselineMode,

        /// Month being analyzed (YYYY-MM), excluded from history averages
        #[arg(short, long)]
        month: Option<String>,

        /// Skip the live exchange-rate feed
        #[arg(long)]
        offline: bool,

        /// Print the raw JSON result
        #[arg(long)]
        json: bool,
    },

    /// Show tracked market assets
    Market {
        /// Skip the live exchange-rate feed
        #[arg(long)]
        offline: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List known expense categories
    Categories,

    /// Manage recorded spending history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Baseline source for analysis requests
        #[arg(short, long, value_enum, default_value = "static")]
        baselines: BaselineMode,

        /// Skip the live exchange-rate feed
        #[arg(long)]
        offline: bool,

        /// Allowed CORS origins (comma-separated)
        #[arg(long, value_delimiter = ',')]
        allowed_origins: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Record a month of transactions
    Record {
        /// Transaction file (.csv or .json)
        #[arg(short, long)]
        file: PathBuf,

        /// Month the transactions belong to (YYYY-MM)
        #[arg(short, long)]
        month: String,
    },

    /// List recorded months
    List,

    /// Record the configured placeholder baselines as a month
    Seed {
        /// Month to record them under (YYYY-MM)
        #[arg(short, long)]
        month: String,
    },
}
