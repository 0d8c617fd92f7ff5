// SPDX-License-Identifier: MIT

//! HTTP route handlers.

pub mod api;
pub mod marathons;
pub mod progress;
pub mod registrations;

use crate::middleware::auth::require_auth;
use crate::middleware::security::add_security_headers;
use crate::AppState;
use axum::http::{header, request::Parts, HeaderValue, Method};
use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness probe; reports the crate version.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Origins allowed to call the API with credentials: the configured web
/// client plus local dev servers.
pub fn origin_allowed(origin: &str, frontend_url: &str) -> bool {
    origin == frontend_url.trim_end_matches('/') || is_local_dev_origin(origin)
}

/// `http://localhost` or `http://127.0.0.1`, any port, nothing else.
fn is_local_dev_origin(origin: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(origin) else {
        return false;
    };
    url.scheme() == "http"
        && matches!(url.host_str(), Some("localhost" | "127.0.0.1"))
        && url.username().is_empty()
        && url.path() == "/"
        && url.query().is_none()
}

fn cors_layer(frontend_url: String) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|o| origin_allowed(o, &frontend_url))
                    .unwrap_or(false)
            },
        ))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
}

/// Everything under `/api`; each request must carry a valid token.
fn api_routes(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .merge(api::routes())
        .merge(marathons::routes())
        .merge(registrations::routes())
        .merge(progress::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(state.config.frontend_url.clone());
    let trace = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_check))
        .merge(api_routes(&state))
        .layer(middleware::from_fn(add_security_headers))
        .layer(cors)
        .layer(trace)
        .with_state(state)
}
