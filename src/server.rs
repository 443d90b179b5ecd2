// HTTP transport - REST API with Axum
//
// Client errors (validation / not found / conflict) → 400.
// Lookups answer errors with a bare JSON string, mutations with {"message"}.
// Store failures → 500, logged, body kept generic.

use crate::error::DirectoryError;
use crate::service::DirectoryService;
use crate::store::SqliteStore;
use crate::views::SwiftCodeRequest;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub const ADDED_MESSAGE: &str = "SWIFT code added successfully";
pub const DELETED_MESSAGE: &str = "SWIFT code deleted successfully";
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    service: Arc<Mutex<DirectoryService<SqliteStore>>>,
}

impl AppState {
    pub fn new(service: DirectoryService<SqliteStore>) -> Self {
        Self {
            service: Arc::new(Mutex::new(service)),
        }
    }

    /// One operation per lock; a panic elsewhere leaves the connection usable
    fn service(&self) -> MutexGuard<'_, DirectoryService<SqliteStore>> {
        self.service.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error mapping
// ============================================================================

fn lookup_error(err: DirectoryError) -> Response {
    if err.is_client_error() {
        warn!("{}", err);
        (StatusCode::BAD_REQUEST, Json(err.to_string())).into_response()
    } else {
        error!("lookup failed: {}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(INTERNAL_MESSAGE)).into_response()
    }
}

fn mutation_error(err: DirectoryError) -> Response {
    if err.is_client_error() {
        warn!("{}", err);
        (StatusCode::BAD_REQUEST, Json(MessageResponse::new(err.to_string()))).into_response()
    } else {
        error!("mutation failed: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(MessageResponse::new(INTERNAL_MESSAGE)),
        )
            .into_response()
    }
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(MessageResponse::new("OK"))
}

/// GET /v1/swift-codes/:swift_code
async fn get_by_code(State(state): State<AppState>, Path(swift_code): Path<String>) -> Response {
    info!(swift_code = %swift_code, "getting record for swift code");

    let result = state.service().get_by_code(&swift_code);
    match result {
        Ok(details) => (StatusCode::OK, Json(details)).into_response(),
        Err(e) => lookup_error(e),
    }
}

/// GET /v1/swift-codes/country/:country_iso2
async fn get_by_country(
    State(state): State<AppState>,
    Path(country_iso2): Path<String>,
) -> Response {
    info!(country = %country_iso2, "getting swift codes for country");

    let result = state.service().get_by_country(&country_iso2);
    match result {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => lookup_error(e),
    }
}

/// POST /v1/swift-codes
async fn add_swift_code(
    State(state): State<AppState>,
    payload: Result<Json<SwiftCodeRequest>, JsonRejection>,
) -> Response {
    // Unreadable bodies get the same 400 {"message"} shape as domain errors
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("rejected request body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(MessageResponse::new(rejection.body_text())),
            )
                .into_response();
        }
    };

    info!(swift_code = %request.swift_code, "adding swift code");

    let result = state.service().insert(&request);
    match result {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new(ADDED_MESSAGE))).into_response(),
        Err(e) => mutation_error(e),
    }
}

/// DELETE /v1/swift-codes/:swift_code
async fn delete_swift_code(
    State(state): State<AppState>,
    Path(swift_code): Path<String>,
) -> Response {
    info!(swift_code = %swift_code, "deleting swift code");

    let result = state.service().delete(&swift_code);
    match result {
        Ok(()) => (StatusCode::OK, Json(MessageResponse::new(DELETED_MESSAGE))).into_response(),
        Err(e) => mutation_error(e),
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/swift-codes", post(add_swift_code))
        .route("/v1/swift-codes/country/:country_iso2", get(get_by_country))
        .route(
            "/v1/swift-codes/:swift_code",
            get(get_by_code).delete(delete_swift_code),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
