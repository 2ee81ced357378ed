//! Expense analysis handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use tracing::debug;

use tusu_core::validate::parse_analyze_request;
use tusu_core::{ExpenseAnalysisResult, HistoryBaselines};

use crate::{ApiResponse, AppError, AppState};

/// POST /api/analyze-expenses - Analyze a batch of transactions
///
/// Body: `{"transactions": [...], "currentMonth": "YYYY-MM"?}`. When the
/// server uses history baselines, `currentMonth` is left out of the averages.
pub async fn analyze_expenses(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<ExpenseAnalysisResult>>, AppError> {
    let Json(body) = payload.map_err(|e| AppError::bad_request(&e.body_text()))?;
    let request = parse_analyze_request(&body)?;

    debug!(
        transactions = request.transactions.len(),
        month = request.current_month.as_deref().unwrap_or("-"),
        "Analyze request"
    );

    let analyzer = match (&state.db, state.config.history_baselines) {
        (Some(db), true) => {
            let mut baselines = HistoryBaselines::new(db.clone());
            if let Some(month) = &request.current_month {
                baselines = baselines.excluding(month.clone());
            }
            state.analyzer.clone().with_baselines(Arc::new(baselines))
        }
        _ => state.analyzer.clone(),
    };

    let result = analyzer
        .analyze_request(&request)
        .await
        .map_err(|e| AppError::internal("Failed to analyze expenses", e))?;

    Ok(ApiResponse::ok(result))
}
