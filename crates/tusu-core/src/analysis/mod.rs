//! Expense analysis pipeline
//!
//! ```text
//! transactions -> aggregate -> resolve baselines -> detect -> compose -> assemble
//! ```
//!
//! Detection is synchronous and pure. Recommendation runs one task per
//! excessive category. Any source error or task failure aborts the call;
//! a dead market feed does not (the source falls back on its own).

mod aggregate;
mod assemble;
mod baseline;
mod detect;
mod messages;
mod recommend;

pub use aggregate::aggregate_by_category;
pub use assemble::assemble;
pub use baseline::{resolve_baselines, BaselineSource, StaticBaselines};
pub use detect::{sort_by_savings, AnomalyDetector};
pub use messages::{category_advice, investment_message, summary_message};
pub use recommend::RecommendationComposer;

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::market::{MarketClient, MarketDataSource};
use crate::models::{AnalyzeExpensesRequest, ExpenseAnalysisResult, Transaction};

/// Runs the full analysis for a batch of transactions
#[derive(Clone)]
pub struct ExpenseAnalyzer {
    config: AnalysisConfig,
    baselines: Arc<dyn BaselineSource>,
    market: Arc<dyn MarketDataSource>,
}

impl ExpenseAnalyzer {
    pub fn new(
        config: AnalysisConfig,
        baselines: Arc<dyn BaselineSource>,
        market: Arc<dyn MarketDataSource>,
    ) -> Self {
        Self {
            config,
            baselines,
            market,
        }
    }

    /// Static baselines and market client taken from the config
    pub fn from_config(config: AnalysisConfig) -> Self {
        let baselines = Arc::new(StaticBaselines::new(config.baselines.clone()));
        let market = Arc::new(MarketClient::from_config(&config.market));
        Self::new(config, baselines, market)
    }

    pub fn with_baselines(mut self, baselines: Arc<dyn BaselineSource>) -> Self {
        self.baselines = baselines;
        self
    }

    pub fn with_market(mut self, market: Arc<dyn MarketDataSource>) -> Self {
        self.market = market;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn market(&self) -> Arc<dyn MarketDataSource> {
        self.market.clone()
    }

    /// Analyze a validated, non-empty batch of transactions
    pub async fn analyze(&self, transactions: &[Transaction]) -> Result<ExpenseAnalysisResult> {
        let spending = aggregate_by_category(transactions);
        let baselines = resolve_baselines(&spending, self.baselines.as_ref()).await?;

        let detector = AnomalyDetector::with_threshold(self.config.threshold_percent);
        let anomalies = detector.detect(&spending, &baselines);

        let composer = RecommendationComposer::new(self.market.clone())
            .with_policy(self.config.snapshot_policy)
            .with_locale(self.config.locale, self.config.currency.clone());
        let recommendations = composer.compose(&anomalies).await?;

        let result = assemble(anomalies, recommendations, &self.config.currency, Utc::now())?;

        info!(
            transactions = transactions.len(),
            categories = spending.len(),
            excessive = result.excessive_categories.len(),
            total_savings = result.total_potential_savings,
            baselines = self.baselines.name(),
            market = self.market.name(),
            "Expense analysis complete"
        );

        Ok(result)
    }

    pub async fn analyze_request(
        &self,
        request: &AnalyzeExpensesRequest,
    ) -> Result<ExpenseAnalysisResult> {
        self.analyze(&request.transactions).await
    }
}
