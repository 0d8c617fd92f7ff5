// SPDX-License-Identifier: MIT

//! JWT authentication middleware.
//!
//! Tokens are issued by the marathon backend and signed with a shared HS256
//! key. The raw token is kept on the request so that backend calls can be
//! made on the user's behalf.

use crate::error::AppError;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Cookie (and client storage key) holding the session token.
pub const TOKEN_COOKIE: &str = "access-token";

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Identity provider user ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    #[serde(default)]
    pub iat: usize,
}

/// Authenticated user extracted from JWT.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub name: Option<String>,
    pub uid: Option<String>,
    /// Forwarded to the backend as a bearer token
    pub token: String,
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Middleware that requires valid JWT authentication.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Try cookie first, then header
    let token = match jar.get(TOKEN_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => bearer_token(&request).ok_or(AppError::Unauthorized)?,
    };

    let key = DecodingKey::from_secret(&state.config.jwt_signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let claims = decode::<Claims>(&token, &key, &validation)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected token");
            AppError::InvalidToken
        })?
        .claims;

    if claims.email.trim().is_empty() {
        return Err(AppError::InvalidToken);
    }

    let auth_user = AuthUser {
        email: claims.email,
        name: claims.name,
        uid: claims.uid,
        token,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Create a JWT in the backend's format. Used by tests and local tooling.
pub fn create_jwt(
    email: &str,
    name: Option<&str>,
    signing_key: &[u8],
    ttl_secs: usize,
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        email: email.to_string(),
        name: name.map(str::to_string),
        uid: None,
        iat: now,
        exp: now + ttl_secs,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
