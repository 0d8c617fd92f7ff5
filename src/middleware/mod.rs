// SPDX-License-Identifier: MIT

//! Middleware modules (authentication, security headers).

pub mod auth;
pub mod security;

pub use auth::{require_auth, AuthUser};
