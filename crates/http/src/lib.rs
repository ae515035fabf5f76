//! HTTP API server for caseintake.

pub mod api_error;
mod api_types;
mod handlers;

use std::sync::Arc;

use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};

use caseintake_outbound::{AnalyticsClient, OptInClient};
use caseintake_service::{HospitalService, ProgressService};
use caseintake_uploads::UploadIssuer;

pub use api_types::VersionResponse;

/// Shared application state for all HTTP handlers.
///
/// Service instances and external-API clients are constructed once per
/// process and shared by reference; optional collaborators stay `None` when
/// unconfigured and their endpoints degrade instead of failing.
pub struct AppState {
    pub progress_service: Arc<ProgressService>,
    pub hospital_service: Arc<HospitalService>,
    pub uploads: Option<Arc<UploadIssuer>>,
    pub analytics: Option<Arc<AnalyticsClient>>,
    pub optin: Option<Arc<OptInClient>>,
}

pub fn create_router(state: Arc<AppState>, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/case-progress", put(handlers::progress::submit_case_progress))
        // Alias kept for older widget builds that POST to the /api prefix.
        .route(
            "/api/case-progress",
            put(handlers::progress::submit_case_progress)
                .post(handlers::progress::submit_case_progress),
        )
        .route("/upload-url", post(handlers::uploads::create_upload_url))
        .route("/track", post(handlers::events::track))
        .route("/opt-in", post(handlers::events::opt_in))
        .route("/hospitals", get(handlers::hospitals::autocomplete))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS for the embedded widget: explicit origin list when configured, any
/// origin otherwise (the endpoints carry no cookies or ambient auth).
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "ignoring unparseable allowed origin");
                None
            },
        })
        .collect();
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn health() -> &'static str {
    "ok"
}

async fn version() -> (StatusCode, Json<VersionResponse>) {
    (StatusCode::OK, Json(VersionResponse { version: env!("CARGO_PKG_VERSION") }))
}
