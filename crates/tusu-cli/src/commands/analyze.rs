//! Analyze command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tusu_core::format::format_amount;
use tusu_core::import::read_transactions;
use tusu_core::validate::parse_month;
use tusu_core::ExpenseAnalysisResult;

use super::{build_analyzer, load_config, open_db};
use crate::cli::BaselineMode;

/// Read a transaction file and analyze it
pub async fn run_analysis(
    db_path: &Path,
    config_path: Option<&Path>,
    file: &Path,
    baselines: BaselineMode,
    month: Option<&str>,
    offline: bool,
) -> Result<ExpenseAnalysisResult> {
    let config = load_config(config_path, offline)?;
    let month = month.map(parse_month).transpose()?;

    let transactions = read_transactions(file)
        .with_context(|| format!("Failed to read transactions from {}", file.display()))?;
    anyhow::ensure!(!transactions.is_empty(), "No transactions in {}", file.display());

    let db = match baselines {
        BaselineMode::History => Some(open_db(db_path)?),
        BaselineMode::Static => None,
    };
    let analyzer = build_analyzer(config, baselines, db.as_ref(), month.as_deref())?;

    let result = analyzer
        .analyze(&transactions)
        .await
        .context("Analysis failed")?;
    Ok(result)
}

pub async fn cmd_analyze(
    db_path: &Path,
    config_path: Option<&Path>,
    file: &Path,
    baselines: BaselineMode,
    month: Option<&str>,
    offline: bool,
    json: bool,
) -> Result<()> {
    let result = run_analysis(db_path, config_path, file, baselines, month, offline).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_analysis(&result);
    Ok(())
}

fn print_analysis(result: &ExpenseAnalysisResult) {
    println!("🔍 Expense analysis ({})", result.analysis_date);
    println!();
    println!("{}", result.message);

    if result.excessive_categories.is_empty() {
        return;
    }

    println!();
    println!(
        "{:<16} {:>12} {:>12} {:>9} {:>12}",
        "Category", "Average", "Current", "Change", "Savings"
    );
    println!("{}", "-".repeat(65));
    for c in &result.excessive_categories {
        println!(
            "{:<16} {:>12} {:>12} {:>8.2}% {:>12}",
            c.category,
            format_amount(c.average_monthly_spending),
            format_amount(c.current_month_spending),
            c.percentage_change,
            format_amount(c.potential_savings)
        );
    }

    println!();
    for line in &result.recommendations {
        println!("   • {}", line);
    }

    println!();
    println!("💰 Investment ideas");
    for c in &result.excessive_categories {
        if let Some(rec) = &c.recommendation {
            println!("   {} → {} ({})", c.category, rec.asset, rec.trend);
            println!("      {}", rec.message);
        }
    }
}
