// SPDX-License-Identifier: MIT

//! Training log and progress dashboards.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{NewProgressEntry, ProgressEntry, ProgressStats, TrainingStreak, WriteAck};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

const MAX_ENTRIES: u32 = 100;
const MAX_PERIOD_DAYS: u32 = 365;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress", get(list_progress).post(log_progress))
        .route("/api/progress/stats", get(progress_stats))
        .route("/api/progress/streak", get(training_streak))
}

#[derive(Deserialize)]
struct ProgressQuery {
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_limit() -> u32 {
    10
}

#[derive(Deserialize)]
struct StatsQuery {
    /// Trailing window in days
    #[serde(default = "default_period")]
    period: u32,
}

fn default_period() -> u32 {
    30
}

async fn list_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<Vec<ProgressEntry>>> {
    let limit = query.limit.clamp(1, MAX_ENTRIES);
    state.backend.list_progress(&user.token, limit).await.map(Json)
}

async fn log_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(entry): Json<NewProgressEntry>,
) -> Result<(StatusCode, Json<WriteAck>)> {
    entry.validate()?;
    let entry = entry.completed(chrono::Utc::now());

    let ack = state.backend.log_progress(&user.token, &entry).await?;
    tracing::info!(
        user = %user.email,
        distance_km = entry.distance,
        pace = ?entry.pace,
        "Progress logged"
    );
    Ok((StatusCode::CREATED, Json(ack)))
}

async fn progress_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ProgressStats>> {
    if query.period == 0 || query.period > MAX_PERIOD_DAYS {
        return Err(AppError::BadRequest(format!(
            "period must be between 1 and {} days",
            MAX_PERIOD_DAYS
        )));
    }
    state
        .backend
        .progress_stats(&user.token, query.period)
        .await
        .map(Json)
}

async fn training_streak(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TrainingStreak>> {
    state.backend.training_streak(&user.token).await.map(Json)
}
