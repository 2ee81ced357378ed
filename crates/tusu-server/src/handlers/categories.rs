//! Expense category handlers

use axum::Json;
use serde::Serialize;

use tusu_core::categories::expense_categories;

use crate::ApiResponse;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// GET /api/expense-categories - Known expense categories
pub async fn list_categories() -> Json<ApiResponse<CategoriesResponse>> {
    ApiResponse::ok(CategoriesResponse {
        categories: expense_categories(),
    })
}
