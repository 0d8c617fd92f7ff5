// SPDX-License-Identifier: MIT

//! RunLytic API: marathon recommendations and catalog service
//!
//! This crate sits between the RunLytic web client and the marathon REST
//! backend. It scores and ranks marathons against a user's preferences,
//! stores those preferences, and validates catalog, registration, and
//! training-log requests before forwarding them.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::PreferenceStore;
use services::{MarathonBackend, RecommendationService};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub backend: Arc<dyn MarathonBackend>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub recommendations: RecommendationService,
}

impl AppState {
    pub fn new(
        config: Config,
        backend: Arc<dyn MarathonBackend>,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Self {
        let recommendations =
            RecommendationService::new(backend.clone(), config.fetch_training_stats);
        Self {
            config,
            backend,
            preferences,
            recommendations,
        }
    }
}
