//! Request validation
//!
//! Shape checks for analysis requests coming from the REST API and from
//! JSON files. Everything here fails with [`Error::Validation`].

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::models::{AnalyzeExpensesRequest, Transaction};

pub const MISSING_TRANSACTIONS: &str = "transactions array is required";
pub const EMPTY_TRANSACTIONS: &str = "transactions array cannot be empty";
pub const INVALID_TRANSACTION_FORMAT: &str =
    "Invalid transaction format. Required fields: date, description, category, amount, currency";

/// Validate a full analysis request body
pub fn parse_analyze_request(body: &Value) -> Result<AnalyzeExpensesRequest> {
    let transactions = transactions_from_request(body)?;

    let current_month = match body.get("currentMonth") {
        None | Some(Value::Null) => None,
        Some(Value::String(month)) => Some(parse_month(month)?),
        Some(_) => {
            return Err(Error::Validation(
                "currentMonth must be a string in YYYY-MM format".to_string(),
            ))
        }
    };

    Ok(AnalyzeExpensesRequest {
        transactions,
        current_month,
    })
}

/// Extract and validate the `transactions` array of a request body
pub fn transactions_from_request(body: &Value) -> Result<Vec<Transaction>> {
    let items = body
        .get("transactions")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::Validation(MISSING_TRANSACTIONS.to_string()))?;

    transactions_from_array(items)
}

/// Validate a bare array of transaction objects
pub fn transactions_from_array(items: &[Value]) -> Result<Vec<Transaction>> {
    if items.is_empty() {
        return Err(Error::Validation(EMPTY_TRANSACTIONS.to_string()));
    }

    items.iter().map(transaction_from_value).collect()
}

/// Validate a single transaction object
pub fn transaction_from_value(item: &Value) -> Result<Transaction> {
    let text = |name: &str| {
        item.get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| Error::Validation(INVALID_TRANSACTION_FORMAT.to_string()))
    };
    let field = |name: &str| {
        text(name)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Validation(INVALID_TRANSACTION_FORMAT.to_string()))
    };

    let date = field("date")?;
    // Descriptions may be blank
    let description = text("description")?;
    let category = field("category")?;
    let currency = field("currency")?;
    let amount = item
        .get("amount")
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::Validation(INVALID_TRANSACTION_FORMAT.to_string()))?;

    let tx = Transaction::new(parse_date(date)?, description, category, amount, currency);
    check_amount(&tx)?;
    Ok(tx)
}

/// Amounts are non-negative and finite
pub fn check_amount(tx: &Transaction) -> Result<()> {
    if !tx.amount.is_finite() || tx.amount < 0.0 {
        return Err(Error::Validation(format!(
            "Transaction amount must be a non-negative number (got {} for '{}')",
            tx.amount, tx.description
        )));
    }
    Ok(())
}

/// Parse a transaction date: `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.date_naive());
    }

    Err(Error::Validation(format!("Invalid transaction date: {}", s)))
}

/// Validate a `YYYY-MM` month key
pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    let valid = s.len() == 7
        && NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d").is_ok();

    if !valid {
        return Err(Error::Validation(format!(
            "Invalid month '{}', expected YYYY-MM",
            s
        )));
    }
    Ok(s.to_string())
}
