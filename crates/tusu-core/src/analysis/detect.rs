//! Anomaly detection
//!
//! Compares each category's current spending against its baseline and keeps
//! the ones that exceed it by more than the threshold. The change is rounded
//! to 2 decimals (half away from zero) before classification, so a reported
//! `percentage_change` is above the threshold exactly when it is flagged.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::format::round2;
use crate::models::{CategoryAnalysis, CategorySpending};

/// Deviation assigned to a positive spend against a zero baseline
const ZERO_BASELINE_CHANGE: f64 = 100.0;

/// Threshold-based excessive spending detector
#[derive(Debug, Clone, Copy)]
pub struct AnomalyDetector {
    /// Percentage above baseline that is still acceptable (strict comparison)
    threshold_percent: f64,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyDetector {
    pub const DEFAULT_THRESHOLD_PERCENT: f64 = 20.0;

    pub fn new() -> Self {
        Self::with_threshold(Self::DEFAULT_THRESHOLD_PERCENT)
    }

    pub fn with_threshold(threshold_percent: f64) -> Self {
        Self { threshold_percent }
    }

    pub fn threshold_percent(&self) -> f64 {
        self.threshold_percent
    }

    /// Percentage change of `current` relative to `baseline`
    ///
    /// A zero baseline never divides: positive spending counts as a 100%
    /// increase and zero spending as no change.
    pub fn percentage_change(current: f64, baseline: f64) -> f64 {
        if baseline == 0.0 {
            return if current > 0.0 {
                ZERO_BASELINE_CHANGE
            } else {
                0.0
            };
        }
        ((current - baseline) / baseline) * 100.0
    }

    pub fn is_excessive(&self, percentage_change: f64) -> bool {
        percentage_change > self.threshold_percent
    }

    /// Produce analyses for excessive categories, largest savings first
    ///
    /// A category missing from `baselines` is compared against itself.
    pub fn detect(
        &self,
        spending: &HashMap<String, CategorySpending>,
        baselines: &HashMap<String, f64>,
    ) -> Vec<CategoryAnalysis> {
        let mut anomalies: Vec<CategoryAnalysis> = spending
            .values()
            .filter_map(|current| {
                let baseline = baselines
                    .get(&current.category)
                    .copied()
                    .unwrap_or(current.total_amount);
                let change = round2(Self::percentage_change(current.total_amount, baseline));

                if !self.is_excessive(change) {
                    return None;
                }

                let savings = if baseline == 0.0 {
                    current.total_amount
                } else {
                    current.total_amount - baseline
                };

                debug!(
                    category = %current.category,
                    current = current.total_amount,
                    baseline,
                    change,
                    "Excessive spending detected"
                );

                Some(CategoryAnalysis {
                    category: current.category.clone(),
                    average_monthly_spending: baseline,
                    current_month_spending: current.total_amount,
                    percentage_change: change,
                    is_excessive: true,
                    potential_savings: round2(savings),
                    recommendation: None,
                })
            })
            .collect();

        sort_by_savings(&mut anomalies);
        anomalies
    }
}

/// Sort by potential savings (highest first), then category name
pub fn sort_by_savings(analyses: &mut [CategoryAnalysis]) {
    analyses.sort_by(|a, b| {
        b.potential_savings
            .partial_cmp(&a.potential_savings)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    type Inputs = (HashMap<String, CategorySpending>, HashMap<String, f64>);

    fn inputs(rows: &[(&str, f64, f64)]) -> Inputs {
        let spending = rows
            .iter()
            .map(|(category, current, _)| {
                (
                    category.to_string(),
                    CategorySpending {
                        category: category.to_string(),
                        total_amount: *current,
                        transaction_count: 1,
                    },
                )
            })
            .collect();
        let baselines = rows
            .iter()
            .map(|(category, _, baseline)| (category.to_string(), *baseline))
            .collect();
        (spending, baselines)
    }

    #[test]
    fn test_dining_scenario() {
        let (spending, baselines) = inputs(&[("Dining", 5350.0, 3000.0)]);
        let anomalies = AnomalyDetector::new().detect(&spending, &baselines);

        assert_eq!(anomalies.len(), 1);
        let dining = &anomalies[0];
        assert_eq!(dining.category, "Dining");
        assert_eq!(dining.percentage_change, 78.33);
        assert_eq!(dining.potential_savings, 2350.0);
        assert_eq!(dining.average_monthly_spending, 3000.0);
        assert_eq!(dining.current_month_spending, 5350.0);
        assert!(dining.is_excessive);
        assert!(dining.recommendation.is_none());
    }

    #[test]
    fn test_exactly_threshold_is_not_excessive() {
        let (spending, baselines) = inputs(&[("Utilities", 1200.0, 1000.0)]);
        assert!(AnomalyDetector::new().detect(&spending, &baselines).is_empty());
    }

    #[test]
    fn test_decimal_twenty_percent_is_not_excessive() {
        // 8.4 / 7.0 is a hair above 1.2 in binary floating point
        let (spending, baselines) = inputs(&[("Books", 8.4, 7.0), ("Gifts", 1.2, 1.0)]);
        assert!(AnomalyDetector::new().detect(&spending, &baselines).is_empty());
    }

    #[test]
    fn test_reported_change_agrees_with_flag() {
        let detector = AnomalyDetector::new();
        let (spending, baselines) = inputs(&[
            ("Books", 8.4, 7.0),
            ("Gifts", 1.2, 1.0),
            ("Dining", 5350.0, 3000.0),
            ("Utilities", 1200.1, 1000.0),
            ("Shopping", 3.6000001, 3.0),
        ]);

        for analysis in detector.detect(&spending, &baselines) {
            assert!(analysis.is_excessive);
            assert!(analysis.percentage_change > detector.threshold_percent());
        }
    }

    #[test]
    fn test_just_over_threshold_is_excessive() {
        let (spending, baselines) = inputs(&[("Utilities", 1200.1, 1000.0)]);
        let anomalies = AnomalyDetector::new().detect(&spending, &baselines);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].percentage_change, 20.01);
        assert_eq!(anomalies[0].potential_savings, 200.1);
    }

    #[test]
    fn test_spending_below_baseline_is_ignored() {
        let (spending, baselines) = inputs(&[("Groceries", 1000.0, 2500.0)]);
        assert!(AnomalyDetector::new().detect(&spending, &baselines).is_empty());
    }

    #[test]
    fn test_missing_baseline_falls_back_to_current() {
        let (spending, _) = inputs(&[("Pets", 500.0, 0.0)]);
        let anomalies = AnomalyDetector::new().detect(&spending, &HashMap::new());
        assert!(anomalies.is_empty());
    }

    #[test]
    fn test_zero_baseline_policy() {
        assert_eq!(AnomalyDetector::percentage_change(250.0, 0.0), 100.0);
        assert_eq!(AnomalyDetector::percentage_change(0.0, 0.0), 0.0);

        let (spending, baselines) = inputs(&[("Travel", 250.0, 0.0), ("Education", 0.0, 0.0)]);
        let anomalies = AnomalyDetector::new().detect(&spending, &baselines);

        assert_eq!(anomalies.len(), 1);
        assert_eq!(anomalies[0].category, "Travel");
        assert_eq!(anomalies[0].percentage_change, 100.0);
        assert_eq!(anomalies[0].potential_savings, 250.0);
        assert!(anomalies[0].percentage_change.is_finite());
    }

    #[test]
    fn test_sorted_by_savings_descending() {
        let (spending, baselines) = inputs(&[
            ("Shopping", 4900.0, 4000.0),
            ("Entertainment", 2000.0, 1500.0),
            ("Dining", 5350.0, 3000.0),
        ]);
        let anomalies = AnomalyDetector::new().detect(&spending, &baselines);

        let order: Vec<_> = anomalies.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(order, vec!["Dining", "Shopping", "Entertainment"]);
    }

    #[test]
    fn test_equal_savings_break_ties_by_name() {
        let (spending, baselines) = inputs(&[
            ("Travel", 1500.0, 1000.0),
            ("Education", 1500.0, 1000.0),
            ("Healthcare", 1500.0, 1000.0),
        ]);
        let anomalies = AnomalyDetector::new().detect(&spending, &baselines);

        let order: Vec<_> = anomalies.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(order, vec!["Education", "Healthcare", "Travel"]);
    }

    #[test]
    fn test_detection_is_idempotent() {
        let (spending, baselines) = inputs(&[
            ("Shopping", 4900.0, 4000.0),
            ("Dining", 5350.0, 3000.0),
            ("Utilities", 900.0, 1000.0),
        ]);
        let detector = AnomalyDetector::new();
        assert_eq!(
            detector.detect(&spending, &baselines),
            detector.detect(&spending, &baselines)
        );
    }

    #[test]
    fn test_custom_threshold() {
        let (spending, baselines) = inputs(&[("Shopping", 4900.0, 4000.0)]);
        assert!(AnomalyDetector::with_threshold(25.0)
            .detect(&spending, &baselines)
            .is_empty());
        assert_eq!(
            AnomalyDetector::with_threshold(10.0)
                .detect(&spending, &baselines)
                .len(),
            1
        );
    }
}
