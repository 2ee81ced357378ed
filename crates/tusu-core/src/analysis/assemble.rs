//! Final result assembly

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::{Error, Result};
use crate::models::{CategoryAnalysis, ExpenseAnalysisResult, InvestmentRecommendation};

use super::messages::{category_advice, summary_message};

/// Pair detector records with their recommendations and build the result
///
/// `recommendations[i]` must belong to `anomalies[i]`.
pub fn assemble(
    anomalies: Vec<CategoryAnalysis>,
    recommendations: Vec<InvestmentRecommendation>,
    currency: &str,
    analysis_date: DateTime<Utc>,
) -> Result<ExpenseAnalysisResult> {
    if anomalies.len() != recommendations.len() {
        return Err(Error::InvalidData(format!(
            "{} excessive categories but {} recommendations",
            anomalies.len(),
            recommendations.len()
        )));
    }

    let total_potential_savings = anomalies
        .iter()
        .fold(0.0, |total, a| total + a.potential_savings);
    let advice = anomalies
        .iter()
        .map(|a| category_advice(a, currency))
        .collect();
    let message = summary_message(anomalies.len(), total_potential_savings, currency);

    let excessive_categories = anomalies
        .into_iter()
        .zip(recommendations)
        .map(|(analysis, recommendation)| analysis.with_recommendation(recommendation))
        .collect();

    Ok(ExpenseAnalysisResult {
        analysis_date: analysis_date.to_rfc3339_opts(SecondsFormat::Millis, true),
        total_potential_savings,
        excessive_categories,
        message,
        recommendations: advice,
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn analysis(category: &str, savings: f64) -> CategoryAnalysis {
        CategoryAnalysis {
            category: category.to_string(),
            average_monthly_spending: 1000.0,
            current_month_spending: 1000.0 + savings,
            percentage_change: savings / 10.0,
            is_excessive: true,
            potential_savings: savings,
            recommendation: None,
        }
    }

    fn rec(asset: &str) -> InvestmentRecommendation {
        InvestmentRecommendation {
            asset: asset.to_string(),
            trend: "+5%".to_string(),
            estimated_gain: 1.0,
            message: String::new(),
        }
    }

    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_pairs_by_index() {
        let result = assemble(
            vec![analysis("Dining", 2350.0), analysis("Shopping", 900.0)],
            vec![rec("Tech Funds"), rec("Gold")],
            "TL",
            date(),
        )
        .unwrap();

        assert_eq!(result.total_potential_savings, 3250.0);
        assert_eq!(result.excessive_categories.len(), 2);
        assert_eq!(
            result.excessive_categories[1].recommendation.as_ref().unwrap().asset,
            "Gold"
        );
        assert_eq!(result.recommendations.len(), 2);
        assert!(result.recommendations[0].contains("Dining"));
        assert!(result.message.contains("2 categories"));
        assert_eq!(result.analysis_date, "2024-03-31T12:00:00.000Z");
    }

    #[test]
    fn test_total_is_exact_sum_of_savings() {
        let anomalies = vec![
            analysis("Alpha", 0.7),
            analysis("Bravo", 0.4),
            analysis("Charlie", 0.3),
        ];
        let recs = vec![rec("Gold"), rec("Gold"), rec("Gold")];
        let result = assemble(anomalies, recs, "TL", date()).unwrap();

        let sum: f64 = result
            .excessive_categories
            .iter()
            .map(|c| c.potential_savings)
            .sum();
        assert_eq!(result.total_potential_savings, sum);
    }

    #[test]
    fn test_empty_analysis() {
        let result = assemble(vec![], vec![], "TL", date()).unwrap();
        assert_eq!(result.total_potential_savings, 0.0);
        assert!(result.total_potential_savings.is_sign_positive());
        assert!(result.excessive_categories.is_empty());
        assert!(result.recommendations.is_empty());
        assert!(result.message.starts_with("✅"));
    }

    #[test]
    fn test_length_mismatch_is_error() {
        let err = assemble(vec![analysis("Dining", 1.0)], vec![], "TL", date()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
