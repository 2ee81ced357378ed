//! Domain models for Tusu
//!
//! Input transactions, the transient per-category aggregates and the
//! analysis output that is serialized as the API payload (camelCase).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A categorized transaction from a bank statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    /// Category label, compared case-sensitively
    pub category: String,
    /// Non-negative amount in `currency`
    pub amount: f64,
    pub currency: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            category: category.into(),
            amount,
            currency: currency.into(),
        }
    }
}

/// Validated analysis request
#[derive(Debug, Clone)]
pub struct AnalyzeExpensesRequest {
    pub transactions: Vec<Transaction>,
    /// Month being analyzed (`YYYY-MM`), if the caller supplied one
    pub current_month: Option<String>,
}

/// Spending totals for one category in the current batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    pub category: String,
    pub total_amount: f64,
    pub transaction_count: u32,
}

/// Analysis of a category whose spending exceeded its baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalysis {
    pub category: String,
    /// Baseline the category was compared against
    pub average_monthly_spending: f64,
    pub current_month_spending: f64,
    /// Deviation from baseline in percent, rounded to 2 decimals
    pub percentage_change: f64,
    pub is_excessive: bool,
    /// Current minus baseline, rounded to 2 decimals
    pub potential_savings: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<InvestmentRecommendation>,
}

impl CategoryAnalysis {
    /// Attach the recommendation generated for this category
    pub fn with_recommendation(mut self, recommendation: InvestmentRecommendation) -> Self {
        self.recommendation = Some(recommendation);
        self
    }
}

/// A tracked asset and its recent performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAsset {
    pub name: String,
    /// Signed percentage change
    pub trend: f64,
}

impl MarketAsset {
    pub fn new(name: impl Into<String>, trend: f64) -> Self {
        Self {
            name: name.into(),
            trend,
        }
    }
}

/// What the savings of a category could have earned in the top asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentRecommendation {
    pub asset: String,
    /// Sign-prefixed percentage, e.g. "+5%"
    pub trend: String,
    pub estimated_gain: f64,
    pub message: String,
}

/// Top-level result of an expense analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseAnalysisResult {
    /// RFC 3339 timestamp of the analysis
    pub analysis_date: String,
    pub total_potential_savings: f64,
    pub excessive_categories: Vec<CategoryAnalysis>,
    pub message: String,
    pub recommendations: Vec<String>,
}

/// One recorded month of spending for a category (history store row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCategorySpending {
    /// Month key, `YYYY-MM`
    pub month: String,
    pub category: String,
    pub total_amount: f64,
    pub transaction_count: u32,
    pub recorded_at: NaiveDateTime,
}
