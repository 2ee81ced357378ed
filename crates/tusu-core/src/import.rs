//! Transaction file readers
//!
//! CSV files use the header `date,description,category,amount,currency`.
//! JSON files hold either a bare array of transactions or a request object
//! with a `transactions` field.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Transaction;
use crate::validate::{check_amount, parse_date, transactions_from_array, transactions_from_request};

#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    description: String,
    category: String,
    amount: String,
    currency: String,
}

/// Parse transactions from CSV
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        // Header is line 1
        let line = index + 2;

        if row.category.is_empty() {
            return Err(Error::Validation(format!("Line {}: missing category", line)));
        }

        let amount = parse_amount(&row.amount).map_err(|_| {
            Error::Validation(format!("Line {}: invalid amount '{}'", line, row.amount))
        })?;
        let tx = Transaction::new(
            parse_date(&row.date)?,
            row.description,
            row.category,
            amount,
            row.currency,
        );
        check_amount(&tx)?;
        transactions.push(tx);
    }

    debug!("Parsed {} CSV transactions", transactions.len());
    Ok(transactions)
}

/// Parse transactions from JSON (array or request object)
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let value: Value = serde_json::from_reader(reader)?;

    let transactions = match &value {
        Value::Array(items) => transactions_from_array(items)?,
        _ => transactions_from_request(&value)?,
    };

    debug!("Parsed {} JSON transactions", transactions.len());
    Ok(transactions)
}

/// Read a transaction file, choosing the parser by extension
pub fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let file = BufReader::new(File::open(path)?);
    match extension.as_deref() {
        Some("csv") => parse_csv(file),
        Some("json") => parse_json(file),
        _ => Err(Error::Validation(format!(
            "Unsupported transaction file {} (expected .csv or .json)",
            path.display()
        ))),
    }
}

/// Parse an amount string, tolerating thousands separators
fn parse_amount(s: &str) -> std::result::Result<f64, std::num::ParseFloatError> {
    s.trim().replace([',', ' '], "").parse::<f64>()
}
