//! Market command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tusu_core::format::format_trend;
use tusu_core::{MarketClient, MarketSnapshot};

use super::load_config;

/// Fetch the configured market snapshot
pub async fn fetch_snapshot(config_path: Option<&Path>, offline: bool) -> Result<MarketSnapshot> {
    let config = load_config(config_path, offline)?;
    let client = MarketClient::from_config(&config.market);
    MarketSnapshot::fetch(&client)
        .await
        .context("Failed to fetch market data")
}

pub async fn cmd_market(config_path: Option<&Path>, offline: bool, json: bool) -> Result<()> {
    let snapshot = fetch_snapshot(config_path, offline).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let top = snapshot.top_asset().map(|a| a.name.clone());

    println!("📈 Tracked assets ({})", snapshot.fetched_at.format("%Y-%m-%d %H:%M UTC"));
    println!();
    for asset in &snapshot.assets {
        let marker = if top.as_deref() == Some(asset.name.as_str()) {
            "⭐"
        } else {
            "  "
        };
        println!("{} {:<20} {:>8}", marker, asset.name, format_trend(asset.trend));
    }

    Ok(())
}
