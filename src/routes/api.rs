// SPDX-License-Identifier: MIT

//! API routes for authenticated users: identity, preferences, and
//! recommendations.

use crate::config::MAX_RECOMMENDATION_LIMIT;
use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{RecommendationResponse, TrainingStats, UserPreferences};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route(
            "/api/preferences",
            get(get_preferences)
                .put(put_preferences)
                .delete(reset_preferences),
        )
        .route(
            "/api/recommendations",
            get(get_recommendations).post(post_recommendations),
        )
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub email: String,
    pub name: Option<String>,
    pub uid: Option<String>,
}

/// Get current user identity from the token.
async fn get_me(Extension(user): Extension<AuthUser>) -> Json<UserResponse> {
    Json(UserResponse {
        email: user.email,
        name: user.name,
        uid: user.uid,
    })
}

// ─── Preferences ─────────────────────────────────────────────

/// Stored preferences, or defaults if the user has none.
async fn load_preferences(state: &AppState, user: &AuthUser) -> Result<UserPreferences> {
    Ok(state
        .preferences
        .get(&user.email)
        .await?
        .unwrap_or_default())
}

async fn get_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserPreferences>> {
    load_preferences(&state, &user).await.map(Json)
}

async fn put_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(prefs): Json<UserPreferences>,
) -> Result<Json<UserPreferences>> {
    prefs.validate()?;
    state.preferences.put(&user.email, &prefs).await?;
    tracing::info!(user = %user.email, "Preferences updated");
    Ok(Json(prefs))
}

/// Forget stored preferences and return the defaults.
async fn reset_preferences(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserPreferences>> {
    state.preferences.delete(&user.email).await?;
    tracing::info!(user = %user.email, "Preferences reset");
    Ok(Json(UserPreferences::default()))
}

// ─── Recommendations ─────────────────────────────────────────

#[derive(Deserialize)]
struct RecommendationsQuery {
    limit: Option<usize>,
}

/// Body of `POST /api/recommendations`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub preferences: Option<UserPreferences>,
    #[serde(default)]
    pub training_data: Option<TrainingStats>,
    #[serde(default)]
    pub limit: Option<usize>,
}

fn resolve_limit(state: &AppState, requested: Option<usize>) -> Result<usize> {
    match requested {
        None => Ok(state.config.recommendation_limit),
        Some(n) if (1..=MAX_RECOMMENDATION_LIMIT).contains(&n) => Ok(n),
        Some(n) => Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}, got {}",
            MAX_RECOMMENDATION_LIMIT, n
        ))),
    }
}

/// Recommendations for the caller's stored preferences.
async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<RecommendationsQuery>,
) -> Result<Json<RecommendationResponse>> {
    let limit = resolve_limit(&state, query.limit)?;
    let prefs = load_preferences(&state, &user).await?;

    state
        .recommendations
        .recommend(&user.token, &prefs, None, limit)
        .await
        .map(Json)
}

/// Recommendations for ad-hoc preferences and training data.
async fn post_recommendations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>> {
    let limit = resolve_limit(&state, request.limit)?;
    let prefs = match request.preferences {
        Some(prefs) => {
            prefs.validate()?;
            prefs
        }
        None => load_preferences(&state, &user).await?,
    };

    state
        .recommendations
        .recommend(&user.token, &prefs, request.training_data, limit)
        .await
        .map(Json)
}
