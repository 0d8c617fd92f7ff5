// SPDX-License-Identifier: MIT

//! Marathon catalog, organizer management, and registration entry point.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Marathon, MarathonDraft, NewMarathon, NewRegistration, RegistrationForm, WriteAck};
use crate::services::{
    registration_phase, validate_schedule, validate_window_order, CatalogQuery, RegistrationPhase,
};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/marathons", get(list_marathons).post(create_marathon))
        .route("/api/marathons/featured", get(featured_marathons))
        .route("/api/marathons/upcoming", get(upcoming_marathons))
        .route("/api/marathons/mine", get(my_marathons))
        .route(
            "/api/marathons/{id}",
            get(get_marathon)
                .patch(update_marathon)
                .delete(delete_marathon),
        )
        .route(
            "/api/marathons/{id}/registration",
            get(registration_status),
        )
        .route(
            "/api/marathons/{id}/registrations",
            axum::routing::post(register),
        )
}

// ─── Catalog ─────────────────────────────────────────────────

async fn list_marathons(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<Marathon>>> {
    let marathons = state.backend.list_marathons(&user.token).await?;
    Ok(Json(query.apply(marathons)))
}

async fn featured_marathons(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Marathon>>> {
    state.backend.featured_marathons(&user.token).await.map(Json)
}

async fn upcoming_marathons(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Marathon>>> {
    state.backend.upcoming_marathons(&user.token).await.map(Json)
}

/// Marathons organized by the caller.
async fn my_marathons(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Marathon>>> {
    state
        .backend
        .organizer_marathons(&user.token, &user.email)
        .await
        .map(Json)
}

async fn get_marathon(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Marathon>> {
    state.backend.get_marathon(&user.token, &id).await.map(Json)
}

// ─── Organizer Management ────────────────────────────────────

async fn create_marathon(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(draft): Json<MarathonDraft>,
) -> Result<(StatusCode, Json<WriteAck>)> {
    draft.validate()?;
    validate_schedule(&draft, chrono::Utc::now())?;

    let marathon = NewMarathon::new(draft, &user.email, chrono::Utc::now());
    let ack = state.backend.create_marathon(&user.token, &marathon).await?;

    tracing::info!(
        organizer = %user.email,
        title = %marathon.draft.title,
        id = ?ack.inserted_id,
        "Marathon created"
    );
    Ok((StatusCode::CREATED, Json(ack)))
}

async fn update_marathon(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(draft): Json<MarathonDraft>,
) -> Result<Json<WriteAck>> {
    draft.validate()?;

    // An opening date that already passed may stay as it is.
    let existing = state.backend.get_marathon(&user.token, &id).await?;
    if draft.start_registration_date == existing.start_registration_date {
        validate_window_order(&draft)?;
    } else {
        validate_schedule(&draft, chrono::Utc::now())?;
    }

    let ack = state.backend.update_marathon(&user.token, &id, &draft).await?;
    tracing::info!(organizer = %user.email, marathon_id = %id, "Marathon updated");
    Ok(Json(ack))
}

async fn delete_marathon(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<WriteAck>> {
    let ack = state.backend.delete_marathon(&user.token, &id).await?;
    tracing::info!(organizer = %user.email, marathon_id = %id, "Marathon deleted");
    Ok(Json(ack))
}

// ─── Registration ────────────────────────────────────────────

/// Whether the caller can register for a marathon right now.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegistrationStatusResponse {
    pub phase: RegistrationPhase,
    pub is_registered: bool,
    pub can_register: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

async fn registration_status(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<RegistrationStatusResponse>> {
    let marathon = state.backend.get_marathon(&user.token, &id).await?;
    let is_registered = state.backend.is_registered(&user.token, &id).await?;
    let phase = registration_phase(&marathon, chrono::Utc::now());

    let message = if is_registered {
        Some("You are already registered for this marathon".to_string())
    } else {
        phase.rejection().map(str::to_string)
    };

    Ok(Json(RegistrationStatusResponse {
        phase,
        is_registered,
        can_register: phase == RegistrationPhase::Open && !is_registered,
        message,
    }))
}

async fn register(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<WriteAck>)> {
    let form = form.normalized();
    form.validate()?;

    let marathon = state.backend.get_marathon(&user.token, &id).await?;
    let now = chrono::Utc::now();
    if let Some(reason) = registration_phase(&marathon, now).rejection() {
        return Err(AppError::BadRequest(reason.to_string()));
    }

    let registration = NewRegistration::new(form, &marathon, &user.email, now);
    let ack = state
        .backend
        .create_registration(&user.token, &registration)
        .await?;

    tracing::info!(user = %user.email, marathon_id = %id, "Registration submitted");
    Ok((StatusCode::CREATED, Json(ack)))
}
