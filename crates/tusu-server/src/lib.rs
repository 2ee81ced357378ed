//! Tusu Web Server
//!
//! Axum-based REST API for the Tusu expense analyzer.
//!
//! Every response uses the same envelope: `{"success": true, "data": ...}`
//! on success and `{"success": false, "error": "..."}` on failure. Request
//! validation failures answer 400; anything else answers 500 with a generic
//! message while the full error is logged.
//!
//! There is no authentication. Bind to localhost unless the server sits
//! behind something that provides it.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use tusu_core::{Database, ExpenseAnalyzer};

mod handlers;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Use the history store for baselines instead of the static table
    pub history_baselines: bool,
}

/// Shared application state
pub struct AppState {
    pub analyzer: ExpenseAnalyzer,
    /// History store, when the server was started with a database
    pub db: Option<Database>,
    pub config: ServerConfig,
}

/// Success envelope
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data,
        })
    }
}

/// Create the application router
pub fn create_router(
    analyzer: ExpenseAnalyzer,
    db: Option<Database>,
    config: ServerConfig,
) -> Router {
    if config.history_baselines && db.is_none() {
        warn!("History baselines requested without a database, using static baselines");
    }

    let cors = build_cors(&config.allowed_origins);

    let state = Arc::new(AppState {
        analyzer,
        db,
        config,
    });

    let api_routes = Router::new()
        .route(
            "/analyze-expenses",
            axum::routing::post(handlers::analyze_expenses),
        )
        .route("/expense-categories", get(handlers::list_categories))
        .route("/market", get(handlers::get_market))
        .route(
            "/history",
            get(handlers::list_history).post(handlers::record_history),
        );

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
        ));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(security_headers)
}

fn build_cors(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        return cors;
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Start the server
pub async fn serve(
    analyzer: ExpenseAnalyzer,
    db: Option<Database>,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let market = &analyzer.config().market;
    if market.offline {
        info!("Market feed offline, {} uses its fallback trend", market.pair_name());
    } else {
        info!(feed = %market.feed_url, "Market feed configured");
    }

    let app = create_router(analyzer, db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// 500 with a caller-facing message, keeping the cause for the log
    pub fn internal(msg: &str, err: impl Into<anyhow::Error>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: Some(err.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "success": false,
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();

        // Caller mistakes keep their message
        if let Some(tusu_core::Error::Validation(msg)) = err.downcast_ref::<tusu_core::Error>() {
            return Self::bad_request(msg);
        }

        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}
