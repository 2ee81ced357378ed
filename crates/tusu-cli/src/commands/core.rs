//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the history database
//! - `load_config` - Load the analysis config with CLI overrides
//! - `build_analyzer` - Wire baselines and market source into an analyzer
//! - `cmd_categories` - List known expense categories

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tusu_core::categories::expense_categories;
use tusu_core::{AnalysisConfig, Database, ExpenseAnalyzer, HistoryBaselines};

use crate::cli::BaselineMode;

/// Open the history database
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

/// Load the analysis config; `offline` forces the fixed market source
pub fn load_config(config_path: Option<&Path>, offline: bool) -> Result<AnalysisConfig> {
    let mut config = AnalysisConfig::load(config_path).context("Failed to load analysis config")?;
    if offline {
        config.market.offline = true;
    }
    Ok(config)
}

/// Build an analyzer with the requested baseline source
pub fn build_analyzer(
    config: AnalysisConfig,
    mode: BaselineMode,
    db: Option<&Database>,
    month: Option<&str>,
) -> Result<ExpenseAnalyzer> {
    let analyzer = ExpenseAnalyzer::from_config(config);

    match mode {
        BaselineMode::Static => Ok(analyzer),
        BaselineMode::History => {
            let db = db.context("History baselines need a database")?;
            let mut baselines = HistoryBaselines::new(db.clone());
            if let Some(month) = month {
                baselines = baselines.excluding(month);
            }
            Ok(analyzer.with_baselines(Arc::new(baselines)))
        }
    }
}

pub fn cmd_categories(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path, true)?;

    println!("📂 Expense categories");
    println!();
    for category in expense_categories() {
        match config.baselines.get(&category) {
            Some(avg) => println!(
                "   {:<16} baseline {} {}",
                category,
                tusu_core::format::format_amount(*avg),
                config.currency
            ),
            None => println!("   {}", category),
        }
    }

    Ok(())
}
