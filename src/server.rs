//! HTTP surface for the hook generator.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::model::HookRequest;
use crate::niches::all_profiles;
use crate::pipeline::HookGenerator;
use crate::HookError;

/// Shared, read-only state for every request
pub struct AppState {
    pub generator: HookGenerator,
}

/// Build the router with all routes
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/generate-hooks", post(generate_hooks))
        .route("/api/niches", get(list_niches))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<(), HookError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "model": state.generator.provider_name().is_some(),
    }))
}

async fn list_niches() -> Json<serde_json::Value> {
    let niches: Vec<_> = all_profiles()
        .iter()
        .map(|p| json!({ "key": p.key, "name": p.name }))
        .collect();
    Json(json!({ "niches": niches }))
}

async fn generate_hooks(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<HookRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            return error_response(StatusCode::BAD_REQUEST, &rejection.body_text());
        }
    };

    match state.generator.generate_hooks(&request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) if e.is_client_error() => error_response(StatusCode::BAD_REQUEST, &e.to_string()),
        Err(e) => {
            warn!("Hook generation failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate hooks")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
