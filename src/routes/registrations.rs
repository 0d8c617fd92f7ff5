// SPDX-License-Identifier: MIT

//! The caller's marathon registrations.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{Registration, RegistrationForm, WriteAck};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/registrations", get(list_registrations))
        .route(
            "/api/registrations/{id}",
            patch(update_registration).delete(cancel_registration),
        )
}

#[derive(Deserialize)]
struct RegistrationsQuery {
    /// Filter by marathon title
    search: Option<String>,
}

async fn list_registrations(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<RegistrationsQuery>,
) -> Result<Json<Vec<Registration>>> {
    state
        .backend
        .user_registrations(&user.token, &user.email, query.search.as_deref())
        .await
        .map(Json)
}

async fn update_registration(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(form): Json<RegistrationForm>,
) -> Result<Json<WriteAck>> {
    let form = form.normalized();
    form.validate()?;

    let ack = state
        .backend
        .update_registration(&user.token, &id, &form)
        .await?;
    tracing::info!(user = %user.email, registration_id = %id, "Registration updated");
    Ok(Json(ack))
}

async fn cancel_registration(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<WriteAck>> {
    let ack = state.backend.cancel_registration(&user.token, &id).await?;
    tracing::info!(user = %user.email, registration_id = %id, "Registration cancelled");
    Ok(Json(ack))
}
