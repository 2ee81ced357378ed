//! Hybrid market source: placeholder assets plus one live exchange-rate pair
//!
//! The live call only proves the feed is reachable. The pair's trend is a
//! fresh random perturbation in [-0.5, +0.5) percent, not a day-over-day
//! delta. Any failure (network, non-2xx, malformed body, missing quote)
//! yields the configured fallback trend. There is no retry.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::MarketConfig;
use crate::error::{Error, Result};
use crate::format::round2;
use crate::models::MarketAsset;

use super::MarketDataSource;

/// Half-width of the illustrative trend range, in percent
const TREND_SPREAD: f64 = 0.5;

#[derive(Clone)]
pub struct ExchangeRateSource {
    http_client: Client,
    feed_url: String,
    quote: String,
    pair_name: String,
    fallback_trend: f64,
    timeout: Duration,
    placeholders: Vec<MarketAsset>,
}

/// Response from the exchange-rate API
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

impl ExchangeRateSource {
    pub fn from_config(config: &MarketConfig) -> Self {
        Self {
            http_client: Client::new(),
            feed_url: config.feed_url.clone(),
            quote: config.quote.clone(),
            pair_name: config.pair_name(),
            fallback_trend: config.fallback_trend,
            timeout: config.timeout(),
            placeholders: config.assets.clone(),
        }
    }

    /// Create a new instance pointed at a different feed
    pub fn with_feed_url(&self, feed_url: &str) -> Self {
        Self {
            feed_url: feed_url.to_string(),
            ..self.clone()
        }
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    /// Fetch the current rate of the quote currency
    pub async fn fetch_rate(&self) -> Result<f64> {
        let response = self
            .http_client
            .get(&self.feed_url)
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Market(format!("Rate feed returned HTTP {}", status)));
        }

        let body: LatestRatesResponse = response.json().await?;
        let rate = body
            .rates
            .get(&self.quote)
            .copied()
            .ok_or_else(|| Error::Market(format!("Rate feed has no {} rate", self.quote)))?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(Error::Market(format!(
                "Rate feed returned invalid {} rate: {}",
                self.quote, rate
            )));
        }

        Ok(rate)
    }

    /// Trend of the live pair, never failing
    pub async fn live_trend(&self) -> f64 {
        match self.fetch_rate().await {
            Ok(rate) => {
                let trend = round2(rand::thread_rng().gen_range(-TREND_SPREAD..TREND_SPREAD));
                info!(
                    pair = %self.pair_name,
                    rate = format!("{:.2}", rate),
                    trend,
                    "Live rate fetched"
                );
                trend
            }
            Err(e) => {
                warn!(
                    pair = %self.pair_name,
                    error = %e,
                    fallback = self.fallback_trend,
                    "Failed to fetch live rate, using fallback trend"
                );
                self.fallback_trend
            }
        }
    }
}

#[async_trait]
impl MarketDataSource for ExchangeRateSource {
    fn name(&self) -> &'static str {
        "exchange_rate"
    }

    async fn fetch_assets(&self) -> Result<Vec<MarketAsset>> {
        let live_trend = self.live_trend().await;

        let mut assets = self.placeholders.clone();
        assets.push(MarketAsset::new(self.pair_name.clone(), live_trend));
        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockRatesServer, RatesBehavior};

    fn source_for(url: &str) -> ExchangeRateSource {
        let config = MarketConfig {
            feed_url: url.to_string(),
            timeout_secs: 2,
            ..Default::default()
        };
        ExchangeRateSource::from_config(&config)
    }

    #[tokio::test]
    async fn test_live_rate_fetched() {
        let server = MockRatesServer::start().await;
        let source = source_for(&server.feed_url());

        let rate = source.fetch_rate().await.unwrap();
        assert_eq!(rate, 32.45);

        let assets = source.fetch_assets().await.unwrap();
        assert_eq!(assets.len(), 4);
        let live = &assets[3];
        assert_eq!(live.name, "USD/TRY");
        assert!(live.trend >= -0.5 && live.trend <= 0.5);
        assert_eq!(server.hits(), 2);
    }

    #[tokio::test]
    async fn test_server_error_uses_fallback() {
        let server = MockRatesServer::start_with(RatesBehavior::ServerError).await;
        let source = source_for(&server.feed_url());

        assert!(matches!(source.fetch_rate().await, Err(Error::Market(_))));
        assert_eq!(source.live_trend().await, 0.1);
    }

    #[tokio::test]
    async fn test_malformed_body_uses_fallback() {
        let server = MockRatesServer::start_with(RatesBehavior::Malformed).await;
        let source = source_for(&server.feed_url());

        assert!(source.fetch_rate().await.is_err());
        let assets = source.fetch_assets().await.unwrap();
        assert_eq!(assets[3].trend, 0.1);
    }

    #[tokio::test]
    async fn test_missing_quote_uses_fallback() {
        let server = MockRatesServer::start_with(RatesBehavior::MissingQuote).await;
        let source = source_for(&server.feed_url());

        assert!(matches!(source.fetch_rate().await, Err(Error::Market(_))));
        assert_eq!(source.live_trend().await, 0.1);
    }

    #[tokio::test]
    async fn test_unreachable_feed_uses_fallback() {
        let source = source_for("http://127.0.0.1:1/v4/latest/USD");
        let assets = source.fetch_assets().await.unwrap();
        assert_eq!(assets.last().unwrap().trend, 0.1);
    }

    #[tokio::test]
    async fn test_placeholders_come_first() {
        let source = source_for("http://127.0.0.1:1/v4/latest/USD");
        let names: Vec<_> = source
            .fetch_assets()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Gold", "Tech Funds", "Sustainable Energy", "USD/TRY"]);
    }

    #[test]
    fn test_with_feed_url() {
        let source = source_for("http://a.example/rates");
        let other = source.with_feed_url("http://b.example/rates");
        assert_eq!(other.feed_url(), "http://b.example/rates");
        assert_eq!(source.feed_url(), "http://a.example/rates");
    }
}
