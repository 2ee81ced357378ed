//! History command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tusu_core::format::format_amount;
use tusu_core::import::read_transactions;
use tusu_core::{AnalysisConfig, Database};

pub fn cmd_history_record(db: &Database, file: &Path, month: &str) -> Result<()> {
    let transactions = read_transactions(file)
        .with_context(|| format!("Failed to read transactions from {}", file.display()))?;

    let count = db
        .update_historical_data(month, &transactions)
        .context("Failed to record history")?;

    println!(
        "✅ Recorded {} categories for {} ({} transactions)",
        count,
        month,
        transactions.len()
    );
    Ok(())
}

pub fn cmd_history_list(db: &Database) -> Result<()> {
    let entries = db.list_history()?;

    if entries.is_empty() {
        println!("No spending history recorded yet.");
        println!("   Record a month with: tusu history record --file feb.csv --month 2024-02");
        return Ok(());
    }

    let mut current_month: Option<&str> = None;
    for entry in &entries {
        if current_month != Some(entry.month.as_str()) {
            if current_month.is_some() {
                println!();
            }
            println!("📅 {}", entry.month);
            current_month = Some(entry.month.as_str());
        }
        println!(
            "   {:<16} {:>12} ({} transactions)",
            entry.category,
            format_amount(entry.total_amount),
            entry.transaction_count
        );
    }

    Ok(())
}

pub fn cmd_history_seed(db: &Database, month: &str, config: &AnalysisConfig) -> Result<()> {
    let count = db
        .seed_baselines(month, &config.baselines)
        .context("Failed to seed baselines")?;

    println!("🌱 Seeded {} placeholder baselines as {}", count, month);
    Ok(())
}
