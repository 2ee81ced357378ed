//! Test utilities for tusu-core
//!
//! This module provides a mock exchange-rate server that can be used for
//! development and integration tests without touching the real feed.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tokio::sync::oneshot;

/// How the mock feed answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatesBehavior {
    /// 200 with a rates table containing TRY
    Ok,
    /// 500 Internal Server Error
    ServerError,
    /// 200 with a body that is not JSON
    Malformed,
    /// 200 with a rates table lacking TRY
    MissingQuote,
}

#[derive(Clone)]
struct MockState {
    behavior: RatesBehavior,
    hits: Arc<AtomicUsize>,
}

/// Mock exchange-rate server for testing and development
pub struct MockRatesServer {
    addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockRatesServer {
    /// Start a healthy mock server on an available port
    pub async fn start() -> Self {
        Self::start_with(RatesBehavior::Ok).await
    }

    /// Start a mock server with the given behavior
    pub async fn start_with(behavior: RatesBehavior) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = MockState {
            behavior,
            hits: hits.clone(),
        };

        let app = Router::new()
            .route("/v4/latest/:base", get(handle_latest))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            hits,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Base URL of this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Feed URL for USD rates
    pub fn feed_url(&self) -> String {
        format!("{}/v4/latest/USD", self.url())
    }

    /// Number of feed requests served so far
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockRatesServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Serialize)]
struct LatestRates {
    base: String,
    rates: std::collections::HashMap<String, f64>,
}

async fn handle_latest(State(state): State<MockState>, Path(base): Path<String>) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);

    match state.behavior {
        RatesBehavior::Ok => Json(LatestRates {
            base,
            rates: [("TRY".to_string(), 32.45), ("EUR".to_string(), 0.92)]
                .into_iter()
                .collect(),
        })
        .into_response(),
        RatesBehavior::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable").into_response()
        }
        RatesBehavior::Malformed => (StatusCode::OK, "<html>not json</html>").into_response(),
        RatesBehavior::MissingQuote => Json(LatestRates {
            base,
            rates: [("EUR".to_string(), 0.92)].into_iter().collect(),
        })
        .into_response(),
    }
}
