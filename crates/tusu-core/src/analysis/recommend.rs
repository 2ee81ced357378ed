//! Investment recommendations for excessive categories
//!
//! One task per category runs on a `JoinSet`. Under
//! [`SnapshotPolicy::PerAnalysis`] the market is fetched once and the
//! snapshot is shared read-only; under [`SnapshotPolicy::PerCategory`] every
//! task fetches on its own. The output is parallel to the input slice.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;

use crate::config::{Locale, SnapshotPolicy};
use crate::error::{Error, Result};
use crate::format::{format_trend, round2};
use crate::market::{MarketDataSource, MarketSnapshot};
use crate::models::{CategoryAnalysis, InvestmentRecommendation};

use super::messages::investment_message;

/// Builds one [`InvestmentRecommendation`] per excessive category
#[derive(Clone)]
pub struct RecommendationComposer {
    market: Arc<dyn MarketDataSource>,
    policy: SnapshotPolicy,
    locale: Locale,
    currency: String,
}

impl RecommendationComposer {
    pub fn new(market: Arc<dyn MarketDataSource>) -> Self {
        Self {
            market,
            policy: SnapshotPolicy::default(),
            locale: Locale::default(),
            currency: "TL".to_string(),
        }
    }

    pub fn with_policy(mut self, policy: SnapshotPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_locale(mut self, locale: Locale, currency: impl Into<String>) -> Self {
        self.locale = locale;
        self.currency = currency.into();
        self
    }

    /// Compose recommendations; entry `i` belongs to `anomalies[i]`
    pub async fn compose(
        &self,
        anomalies: &[CategoryAnalysis],
    ) -> Result<Vec<InvestmentRecommendation>> {
        if anomalies.is_empty() {
            return Ok(vec![]);
        }

        let shared = match self.policy {
            SnapshotPolicy::PerAnalysis => {
                Some(Arc::new(MarketSnapshot::fetch(self.market.as_ref()).await?))
            }
            SnapshotPolicy::PerCategory => None,
        };

        let mut tasks = JoinSet::new();
        for (index, anomaly) in anomalies.iter().enumerate() {
            let category = anomaly.category.clone();
            let savings = anomaly.potential_savings;
            let snapshot = shared.clone();
            let composer = self.clone();

            tasks.spawn(async move {
                let snapshot = match snapshot {
                    Some(snapshot) => snapshot,
                    None => Arc::new(MarketSnapshot::fetch(composer.market.as_ref()).await?),
                };
                let recommendation = composer.recommend(&category, savings, &snapshot)?;
                Ok::<_, Error>((index, recommendation))
            });
        }

        let mut slots: Vec<Option<InvestmentRecommendation>> = vec![None; anomalies.len()];
        while let Some(joined) = tasks.join_next().await {
            let (index, recommendation) = joined??;
            slots[index] = Some(recommendation);
        }

        slots
            .into_iter()
            .map(|slot| {
                slot.ok_or_else(|| Error::Market("Recommendation task produced no result".into()))
            })
            .collect()
    }

    /// Recommendation for a single category against a snapshot
    pub fn recommend(
        &self,
        category: &str,
        savings: f64,
        snapshot: &MarketSnapshot,
    ) -> Result<InvestmentRecommendation> {
        let top = snapshot
            .top_asset()
            .ok_or_else(|| Error::Market("Market snapshot has no assets".to_string()))?;

        let estimated_gain = round2(savings * (top.trend / 100.0));
        debug!(
            category,
            asset = %top.name,
            trend = top.trend,
            estimated_gain,
            "Recommendation composed"
        );

        Ok(InvestmentRecommendation {
            asset: top.name.clone(),
            trend: format_trend(top.trend),
            estimated_gain,
            message: investment_message(
                self.locale,
                &self.currency,
                category,
                savings,
                &top.name,
                top.trend,
                estimated_gain,
            ),
        })
    }
}
