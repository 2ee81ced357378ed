//! Monthly spending history

use std::collections::BTreeMap;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{parse_datetime, Database};
use crate::analysis::{aggregate_by_category, BaselineSource};
use crate::error::{Error, Result};
use crate::models::{CategorySpending, MonthlyCategorySpending, Transaction};
use crate::validate::parse_month;

impl Database {
    /// Upsert a month's per-category aggregates
    ///
    /// Returns the number of categories recorded.
    pub fn record_month(&self, month: &str, spending: &[CategorySpending]) -> Result<usize> {
        let month = parse_month(month)?;
        if let Some(bad) = spending
            .iter()
            .find(|s| !s.total_amount.is_finite() || s.total_amount < 0.0)
        {
            return Err(Error::InvalidData(format!(
                "Cannot record {} total for {}",
                bad.total_amount, bad.category
            )));
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        for s in spending {
            tx.execute(
                r#"
                INSERT INTO category_monthly_spending (month, category, total_amount, transaction_count)
                VALUES (?, ?, ?, ?)
                ON CONFLICT(month, category) DO UPDATE SET
                    total_amount = excluded.total_amount,
                    transaction_count = excluded.transaction_count,
                    recorded_at = CURRENT_TIMESTAMP
                "#,
                params![month, s.category, s.total_amount, s.transaction_count],
            )?;
        }
        tx.commit()?;

        debug!(month = %month, categories = spending.len(), "Recorded monthly spending");
        Ok(spending.len())
    }

    /// Aggregate a month of transactions and record the totals
    pub fn update_historical_data(
        &self,
        month: &str,
        transactions: &[Transaction],
    ) -> Result<usize> {
        let mut spending: Vec<CategorySpending> =
            aggregate_by_category(transactions).into_values().collect();
        spending.sort_by(|a, b| a.category.cmp(&b.category));
        self.record_month(month, &spending)
    }

    /// Record a fixed baseline table as a month of history
    pub fn seed_baselines(&self, month: &str, baselines: &BTreeMap<String, f64>) -> Result<usize> {
        let spending: Vec<CategorySpending> = baselines
            .iter()
            .map(|(category, amount)| CategorySpending {
                category: category.clone(),
                total_amount: *amount,
                transaction_count: 0,
            })
            .collect();
        self.record_month(month, &spending)
    }

    /// Record the built-in placeholder baselines as a month of history
    pub fn seed_default_baselines(&self, month: &str) -> Result<usize> {
        self.seed_baselines(month, &crate::categories::default_baselines())
    }

    /// Average monthly total for a category, `None` if never recorded
    pub fn category_average(
        &self,
        category: &str,
        exclude_month: Option<&str>,
    ) -> Result<Option<f64>> {
        let conn = self.conn()?;
        let average: Option<f64> = conn
            .query_row(
                r#"
                SELECT AVG(total_amount)
                FROM category_monthly_spending
                WHERE category = ?1 AND (?2 IS NULL OR month != ?2)
                "#,
                params![category, exclude_month],
                |row| row.get::<_, Option<f64>>(0),
            )
            .optional()?
            .flatten();
        Ok(average)
    }

    /// All recorded rows, newest month first
    pub fn list_history(&self) -> Result<Vec<MonthlyCategorySpending>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT month, category, total_amount, transaction_count, recorded_at
            FROM category_monthly_spending
            ORDER BY month DESC, category ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                let recorded_at: String = row.get(4)?;
                Ok(MonthlyCategorySpending {
                    month: row.get(0)?,
                    category: row.get(1)?,
                    total_amount: row.get(2)?,
                    transaction_count: row.get(3)?,
                    recorded_at: parse_datetime(&recorded_at),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Distinct recorded months, newest first
    pub fn list_months(&self) -> Result<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT DISTINCT month FROM category_monthly_spending ORDER BY month DESC",
        )?;
        let months = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<String>, _>>()?;
        Ok(months)
    }
}

/// Baselines backed by the history store
#[derive(Clone)]
pub struct HistoryBaselines {
    db: Database,
    /// Month left out of the averages (usually the one being analyzed)
    exclude_month: Option<String>,
}

impl HistoryBaselines {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            exclude_month: None,
        }
    }

    pub fn excluding(mut self, month: impl Into<String>) -> Self {
        self.exclude_month = Some(month.into());
        self
    }
}

#[async_trait]
impl BaselineSource for HistoryBaselines {
    fn name(&self) -> &'static str {
        "history"
    }

    async fn average_for(&self, category: &str) -> Result<Option<f64>> {
        self.db
            .category_average(category, self.exclude_month.as_deref())
    }
}
