//! Static market source

use async_trait::async_trait;

use crate::config::MarketConfig;
use crate::error::Result;
use crate::models::MarketAsset;

use super::MarketDataSource;

/// Returns the same assets on every fetch
#[derive(Debug, Clone, Default)]
pub struct FixedMarketSource {
    assets: Vec<MarketAsset>,
}

impl FixedMarketSource {
    pub fn new(assets: Vec<MarketAsset>) -> Self {
        Self { assets }
    }

    /// Placeholder assets plus the live pair pinned at its fallback trend
    pub fn offline(config: &MarketConfig) -> Self {
        let mut assets = config.assets.clone();
        assets.push(MarketAsset::new(config.pair_name(), config.fallback_trend));
        Self::new(assets)
    }
}

#[async_trait]
impl MarketDataSource for FixedMarketSource {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn fetch_assets(&self) -> Result<Vec<MarketAsset>> {
        Ok(self.assets.clone())
    }
}
