//! Baseline resolution
//!
//! Baselines come from a pluggable [`BaselineSource`]. Categories the source
//! has never seen use their own current spending as baseline (cold start), so
//! a brand-new category can never be flagged on its first appearance.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::CategorySpending;

/// Lookup of historical average monthly spending per category
#[async_trait]
pub trait BaselineSource: Send + Sync {
    /// Human-readable name (for logging)
    fn name(&self) -> &'static str;

    /// Average monthly spending for a category, `None` if never seen
    async fn average_for(&self, category: &str) -> Result<Option<f64>>;
}

/// Fixed category -> average table
#[derive(Debug, Clone, Default)]
pub struct StaticBaselines {
    averages: BTreeMap<String, f64>,
}

impl StaticBaselines {
    pub fn new(averages: BTreeMap<String, f64>) -> Self {
        Self { averages }
    }

    /// The placeholder table shipped with Tusu
    pub fn defaults() -> Self {
        Self::new(crate::categories::default_baselines())
    }

    /// Builder-style insert, handy in tests
    pub fn with(mut self, category: impl Into<String>, average: f64) -> Self {
        self.averages.insert(category.into(), average);
        self
    }
}

#[async_trait]
impl BaselineSource for StaticBaselines {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn average_for(&self, category: &str) -> Result<Option<f64>> {
        Ok(self.averages.get(category).copied())
    }
}

/// Resolve a baseline for every category in the current batch
///
/// Source entries are used verbatim after a sanity check; a negative or
/// non-finite average is a malformed entry and aborts the analysis.
pub async fn resolve_baselines(
    spending: &HashMap<String, CategorySpending>,
    source: &dyn BaselineSource,
) -> Result<HashMap<String, f64>> {
    let mut baselines = HashMap::with_capacity(spending.len());

    for (category, current) in spending {
        let baseline = match source.average_for(category).await? {
            Some(average) => {
                if !average.is_finite() || average < 0.0 {
                    return Err(Error::InvalidData(format!(
                        "Historical average for {} is invalid: {}",
                        category, average
                    )));
                }
                average
            }
            None => {
                debug!(
                    category = %category,
                    source = source.name(),
                    "No history for category, using current spending as baseline"
                );
                current.total_amount
            }
        };
        baselines.insert(category.clone(), baseline);
    }

    Ok(baselines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spending(category: &str, total: f64) -> (String, CategorySpending) {
        (
            category.to_string(),
            CategorySpending {
                category: category.to_string(),
                total_amount: total,
                transaction_count: 1,
            },
        )
    }

    #[tokio::test]
    async fn test_known_category_uses_history() {
        let current: HashMap<_, _> = [spending("Dining", 5350.0)].into_iter().collect();
        let baselines = resolve_baselines(&current, &StaticBaselines::defaults())
            .await
            .unwrap();
        assert_eq!(baselines["Dining"], 3000.0);
    }

    #[tokio::test]
    async fn test_unseen_category_uses_current_spending() {
        let current: HashMap<_, _> = [spending("Pets", 500.0)].into_iter().collect();
        let source = StaticBaselines::defaults();
        let baselines = resolve_baselines(&current, &source).await.unwrap();

        assert_eq!(baselines["Pets"], 500.0);
        // The source itself is left untouched
        assert_eq!(source.average_for("Pets").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_covers_every_current_category() {
        let current: HashMap<_, _> = [
            spending("Dining", 10.0),
            spending("Pets", 20.0),
            spending("Utilities", 30.0),
        ]
        .into_iter()
        .collect();
        let baselines = resolve_baselines(&current, &StaticBaselines::defaults())
            .await
            .unwrap();
        assert_eq!(baselines.len(), 3);
    }

    #[tokio::test]
    async fn test_negative_history_is_rejected() {
        let current: HashMap<_, _> = [spending("Dining", 100.0)].into_iter().collect();
        let source = StaticBaselines::default().with("Dining", -5.0);
        let err = resolve_baselines(&current, &source).await.unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[tokio::test]
    async fn test_nan_history_is_rejected() {
        let current: HashMap<_, _> = [spending("Dining", 100.0)].into_iter().collect();
        let source = StaticBaselines::default().with("Dining", f64::NAN);
        assert!(resolve_baselines(&current, &source).await.is_err());
    }
}
