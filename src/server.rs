// 🌐 Receipt API - process and retrieve endpoints
//
// POST /receipts/process     -> {"id": "..."}
// GET  /receipts/:id/points  -> {"points": N}

use crate::config::ServerConfig;
use crate::points;
use crate::receipt::Receipt;
use crate::store::{InMemoryStore, ReceiptStore, ScoreRecord, StoreError};
use crate::validation::{self, ValidationError};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

// ============================================================================
// SHARED STATE
// ============================================================================

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ReceiptStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ReceiptStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::new()))
    }

    pub fn store(&self) -> &dyn ReceiptStore {
        self.store.as_ref()
    }
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid receipt: {}", describe(.0))]
    Validation(Vec<ValidationError>),

    #[error("No receipt found for id {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(StoreError),
}

fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Store(other),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Violated validation rule classes, when applicable
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Store(_) => "STORE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let violations = match &self {
            ApiError::Validation(errors) => errors.iter().map(|e| e.kind().to_string()).collect(),
            _ => Vec::new(),
        };

        let body = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            violations,
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// API HANDLERS
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// POST /receipts/process - Validate, score, and store a receipt
pub async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<ProcessResponse>> {
    let receipt: Receipt = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "rejected receipt with malformed JSON");
        ApiError::InvalidJson(e)
    })?;

    if let Err(errors) = validation::validate(&receipt) {
        tracing::warn!(
            violations = errors.len(),
            "rejected invalid receipt: {}",
            describe(&errors)
        );
        return Err(ApiError::Validation(errors));
    }

    let breakdown = points::breakdown(&receipt);
    let points = breakdown.total();
    tracing::debug!(retailer = %receipt.retailer, "{}", breakdown.summary());

    let id = Uuid::new_v4().to_string();
    state.store().put(id.clone(), ScoreRecord { points, receipt })?;
    tracing::info!(%id, points, "stored receipt");

    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/:id/points - Points for a previously processed receipt
pub async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PointsResponse>> {
    let points = state.store().get(&id).map_err(|e| {
        tracing::warn!(%id, error = %e, "points lookup failed");
        ApiError::from(e)
    })?;

    Ok(Json(PointsResponse { points }))
}

// ============================================================================
// ROUTER
// ============================================================================

pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.max_body_bytes));

    if config.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.layer(TraceLayer::new_for_http())
}

/// Bind the configured address and serve until the process exits
pub async fn serve(state: AppState, config: ServerConfig) -> anyhow::Result<()> {
    use anyhow::Context;

    let app = create_router(state, &config);
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.listen_addr))?;

    tracing::info!("receipt server listening on {}", config.listen_addr);

    axum::serve(listener, app).await.context("Server terminated")
}

// ============================================================================
// TESTS
// ============================================================================
