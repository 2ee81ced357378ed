//! Market data handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use tusu_core::{MarketAsset, MarketSnapshot};

use crate::{ApiResponse, AppError, AppState};

/// Current snapshot plus the asset recommendations would use
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketResponse {
    #[serde(flatten)]
    pub snapshot: MarketSnapshot,
    pub top_asset: Option<MarketAsset>,
}

/// GET /api/market - Fetch the tracked assets
pub async fn get_market(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<MarketResponse>>, AppError> {
    let market = state.analyzer.market();
    let snapshot = MarketSnapshot::fetch(market.as_ref()).await?;
    let top_asset = snapshot.top_asset().cloned();

    Ok(ApiResponse::ok(MarketResponse {
        snapshot,
        top_asset,
    }))
}
