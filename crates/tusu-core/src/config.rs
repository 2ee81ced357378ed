//! Analysis configuration
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tusu/config/analysis.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Environment variables applied on top:
//! - `TUSU_MARKET_FEED_URL`: exchange-rate feed URL
//! - `TUSU_MARKET_OFFLINE`: skip the live feed and use the fallback trend

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::MarketAsset;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analysis.toml");

/// Environment variable overriding the feed URL
pub const FEED_URL_ENV: &str = "TUSU_MARKET_FEED_URL";

/// Environment variable disabling the live feed
pub const OFFLINE_ENV: &str = "TUSU_MARKET_OFFLINE";

/// Language of generated messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Tr,
    En,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Tr => "tr",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tr" | "turkish" => Ok(Locale::Tr),
            "en" | "english" => Ok(Locale::En),
            _ => Err(format!("Unknown locale: {}", s)),
        }
    }
}

/// How market snapshots are shared between the categories of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotPolicy {
    /// Fetch once per analysis call, every category sees the same assets
    #[default]
    PerAnalysis,
    /// Every excessive category fetches independently
    PerCategory,
}

impl SnapshotPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotPolicy::PerAnalysis => "per_analysis",
            SnapshotPolicy::PerCategory => "per_category",
        }
    }
}

impl FromStr for SnapshotPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "per_analysis" | "per-analysis" => Ok(SnapshotPolicy::PerAnalysis),
            "per_category" | "per-category" => Ok(SnapshotPolicy::PerCategory),
            _ => Err(format!("Unknown snapshot policy: {}", s)),
        }
    }
}

/// Live feed and placeholder asset settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub feed_url: String,
    pub base: String,
    pub quote: String,
    pub fallback_trend: f64,
    pub timeout_secs: u64,
    /// Skip the network call entirely
    pub offline: bool,
    /// Fixed assets evaluated before the live pair
    pub assets: Vec<MarketAsset>,
}

impl MarketConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Display name of the live pair, e.g. "USD/TRY"
    pub fn pair_name(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            feed_url: "https://api.exchangerate-api.com/v4/latest/USD".to_string(),
            base: "USD".to_string(),
            quote: "TRY".to_string(),
            fallback_trend: 0.1,
            timeout_secs: 10,
            offline: false,
            assets: vec![
                MarketAsset::new("Gold", 1.2),
                MarketAsset::new("Tech Funds", 5.0),
                MarketAsset::new("Sustainable Energy", 3.4),
            ],
        }
    }
}

/// Configuration for the expense analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Percentage above baseline that marks a category as excessive (strict)
    pub threshold_percent: f64,
    /// Currency label used in messages
    pub currency: String,
    pub locale: Locale,
    pub snapshot_policy: SnapshotPolicy,
    pub market: MarketConfig,
    /// Placeholder average monthly spending per category
    pub baselines: BTreeMap<String, f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold_percent: 20.0,
            currency: "TL".to_string(),
            locale: Locale::Tr,
            snapshot_policy: SnapshotPolicy::PerAnalysis,
            market: MarketConfig::default(),
            baselines: crate::categories::default_baselines(),
        }
    }
}

impl AnalysisConfig {
    /// Load config (explicit path or data-dir override, then embedded default)
    /// and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = load_config(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TUSU_*` environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(FEED_URL_ENV) {
            if !url.trim().is_empty() {
                self.market.feed_url = url.trim().to_string();
            }
        }
        if let Ok(flag) = std::env::var(OFFLINE_ENV) {
            self.market.offline = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes");
        }
    }

    fn validate(&self) -> Result<()> {
        if !self.threshold_percent.is_finite() || self.threshold_percent < 0.0 {
            return Err(Error::InvalidData(format!(
                "threshold_percent must be a non-negative number, got {}",
                self.threshold_percent
            )));
        }
        if !self.market.fallback_trend.is_finite() {
            return Err(Error::InvalidData(
                "market.fallback_trend must be finite".to_string(),
            ));
        }
        if let Some(asset) = self.market.assets.iter().find(|a| !a.trend.is_finite()) {
            return Err(Error::InvalidData(format!(
                "market asset {} has a non-finite trend",
                asset.name
            )));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tusu").join("config").join("analysis.toml"))
}

fn load_config(override_path: Option<&Path>) -> Result<AnalysisConfig> {
    let candidate = match override_path {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    let content = match candidate {
        Some(path) if path.exists() => {
            tracing::debug!(path = %path.display(), "Loading analysis config");
            fs::read_to_string(&path)
                .map_err(|e| Error::InvalidData(format!("Failed to read config: {}", e)))?
        }
        Some(path) if override_path.is_some() => {
            return Err(Error::NotFound(format!(
                "Config file {} does not exist",
                path.display()
            )));
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    AnalysisConfig::from_toml(&content)
}
