//! Market data sources
//!
//! Recommendations need the current trend of a handful of tracked assets.
//! Sources are pluggable behind [`MarketDataSource`]:
//!
//! - `ExchangeRateSource`: placeholder assets plus one live currency pair
//!   from an exchange-rate API (falls back to a fixed trend on any failure)
//! - `FixedMarketSource`: a static asset list (offline mode, tests)
//!
//! `MarketClient` wraps the built-in sources for config-driven construction.
//!
//! # Usage
//!
//! ```rust,ignore
//! let client = MarketClient::from_config(&config.market);
//! let snapshot = MarketSnapshot::fetch(&client).await?;
//! if let Some(top) = snapshot.top_asset() {
//!     println!("{} {}", top.name, top.trend);
//! }
//! ```

mod exchange_rate;
mod fixed;

pub use exchange_rate::ExchangeRateSource;
pub use fixed::FixedMarketSource;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::MarketConfig;
use crate::error::Result;
use crate::models::MarketAsset;

/// A provider of tracked asset trends
///
/// Sources handle their own recoverable failures (a dead feed should yield a
/// fallback trend, not an error). An `Err` here aborts the analysis.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Source name (for logging)
    fn name(&self) -> &'static str;

    /// Fetch the asset list in evaluation order
    async fn fetch_assets(&self) -> Result<Vec<MarketAsset>>;
}

/// Pick the asset with the strictly highest trend
///
/// On ties the first asset in list order wins.
pub fn top_performing_asset(assets: &[MarketAsset]) -> Option<&MarketAsset> {
    assets.iter().fold(None, |best: Option<&MarketAsset>, asset| match best {
        Some(current) if asset.trend > current.trend => Some(asset),
        Some(current) => Some(current),
        None => Some(asset),
    })
}

/// Assets fetched at one point in time
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub assets: Vec<MarketAsset>,
    pub fetched_at: DateTime<Utc>,
}

impl MarketSnapshot {
    pub fn new(assets: Vec<MarketAsset>) -> Self {
        Self {
            assets,
            fetched_at: Utc::now(),
        }
    }

    /// Fetch a snapshot from a source
    pub async fn fetch(source: &dyn MarketDataSource) -> Result<Self> {
        let assets = source.fetch_assets().await?;
        tracing::debug!(
            source = source.name(),
            count = assets.len(),
            "Market snapshot fetched"
        );
        Ok(Self::new(assets))
    }

    pub fn top_asset(&self) -> Option<&MarketAsset> {
        top_performing_asset(&self.assets)
    }
}

/// Built-in market sources
#[derive(Clone)]
pub enum MarketClient {
    /// Placeholder assets plus the live exchange-rate pair
    Live(ExchangeRateSource),
    /// Static asset list
    Fixed(FixedMarketSource),
}

impl MarketClient {
    /// Build the configured source; offline mode never touches the network
    pub fn from_config(config: &MarketConfig) -> Self {
        if config.offline {
            MarketClient::Fixed(FixedMarketSource::offline(config))
        } else {
            MarketClient::Live(ExchangeRateSource::from_config(config))
        }
    }

    pub fn fixed(assets: Vec<MarketAsset>) -> Self {
        MarketClient::Fixed(FixedMarketSource::new(assets))
    }
}

#[async_trait]
impl MarketDataSource for MarketClient {
    fn name(&self) -> &'static str {
        match self {
            MarketClient::Live(s) => s.name(),
            MarketClient::Fixed(s) => s.name(),
        }
    }

    async fn fetch_assets(&self) -> Result<Vec<MarketAsset>> {
        match self {
            MarketClient::Live(s) => s.fetch_assets().await,
            MarketClient::Fixed(s) => s.fetch_assets().await,
        }
    }
}
