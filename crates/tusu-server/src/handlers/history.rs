//! Spending history handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use tusu_core::validate::{parse_month, transactions_from_request};
use tusu_core::{Database, MonthlyCategorySpending};

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHistoryResponse {
    pub month: String,
    pub categories_recorded: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub months: Vec<String>,
    pub entries: Vec<MonthlyCategorySpending>,
}

fn history_db(state: &AppState) -> Result<&Database, AppError> {
    state
        .db
        .as_ref()
        .ok_or_else(|| AppError::not_found("History store is not enabled on this server"))
}

/// POST /api/history - Record a month of transactions
///
/// Body: `{"month": "YYYY-MM", "transactions": [...]}`
pub async fn record_history(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<RecordHistoryResponse>>, AppError> {
    let db = history_db(&state)?;
    let Json(body) = payload.map_err(|e| AppError::bad_request(&e.body_text()))?;

    let month = body
        .get("month")
        .and_then(Value::as_str)
        .ok_or_else(|| AppError::bad_request("month is required (YYYY-MM)"))?;
    let month = parse_month(month)?;
    let transactions = transactions_from_request(&body)?;

    let categories_recorded = db.update_historical_data(&month, &transactions)?;
    info!(month = %month, categories = categories_recorded, "Recorded spending history");

    Ok(ApiResponse::ok(RecordHistoryResponse {
        month,
        categories_recorded,
    }))
}

/// GET /api/history - List recorded monthly aggregates
pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HistoryResponse>>, AppError> {
    let db = history_db(&state)?;

    Ok(ApiResponse::ok(HistoryResponse {
        months: db.list_months()?,
        entries: db.list_history()?,
    }))
}
