// SPDX-License-Identifier: MIT

//! Services module - business logic layer.

pub mod backend;
pub mod catalog;
pub mod ranking;
pub mod recommendation;
pub mod retry;
pub mod schedule;
pub mod scoring;

pub use backend::{BackendClient, MarathonBackend};
pub use catalog::{CatalogQuery, CatalogSort};
pub use recommendation::RecommendationService;
pub use retry::RetryConfig;
pub use schedule::{
    registration_phase, validate_schedule, validate_window_order, RegistrationPhase, ScheduleError,
};
