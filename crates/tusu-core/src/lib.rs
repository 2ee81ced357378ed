//! Tusu Core Library
//!
//! Shared functionality for the Tusu expense analyzer:
//! - Category aggregation and threshold-based anomaly detection
//! - Pluggable baseline sources (static table, SQLite history)
//! - Market data sources (live exchange-rate pair plus placeholder assets)
//! - Investment recommendations for overspent categories
//! - Request validation and transaction file readers
//! - Analysis configuration with embedded defaults

pub mod analysis;
pub mod categories;
pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod import;
pub mod market;
pub mod models;
pub mod validate;

/// Test utilities including mock exchange-rate server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analysis::{
    AnomalyDetector, BaselineSource, ExpenseAnalyzer, RecommendationComposer, StaticBaselines,
};
pub use config::{AnalysisConfig, Locale, MarketConfig, SnapshotPolicy};
pub use db::{Database, HistoryBaselines};
pub use error::{Error, Result};
pub use market::{
    ExchangeRateSource, FixedMarketSource, MarketClient, MarketDataSource, MarketSnapshot,
};
pub use models::{
    AnalyzeExpensesRequest, CategoryAnalysis, CategorySpending, ExpenseAnalysisResult,
    InvestmentRecommendation, MarketAsset, MonthlyCategorySpending, Transaction,
};
