//! Tusu CLI - Expense anomaly detection and investment recommendations
//!
//! Usage:
//!   tusu analyze --file march.csv        Analyze a month of transactions
//!   tusu history record --file feb.csv --month 2024-02
//!   tusu market                          Show tracked assets
//!   tusu serve --port 3000               Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Analyze {
            file,
            baselines,
            month,
            offline,
            json,
        } => {
            commands::cmd_analyze(
                &cli.db,
                config_path,
                &file,
                baselines,
                month.as_deref(),
                offline,
                json,
            )
            .await
        }
        Commands::Market { offline, json } => {
            commands::cmd_market(config_path, offline, json).await
        }
        Commands::Categories => commands::cmd_categories(config_path),
        Commands::History { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                HistoryAction::Record { file, month } => {
                    commands::cmd_history_record(&db, &file, &month)
                }
                HistoryAction::List => commands::cmd_history_list(&db),
                HistoryAction::Seed { month } => {
                    let config = commands::load_config(config_path, false)?;
                    commands::cmd_history_seed(&db, &month, &config)
                }
            }
        }
        Commands::Serve {
            port,
            host,
            baselines,
            offline,
            allowed_origins,
        } => {
            commands::cmd_serve(
                &cli.db,
                config_path,
                &host,
                port,
                baselines,
                offline,
                allowed_origins,
            )
            .await
        }
    }
}
