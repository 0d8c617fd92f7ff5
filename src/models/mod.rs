// SPDX-License-Identifier: MIT

//! Data models for the application.

pub mod marathon;
pub mod preferences;
pub mod recommendation;
pub mod registration;
pub mod training;

pub use marathon::{Difficulty, Marathon, MarathonDraft, NewMarathon, RunningDistance, Terrain, WriteAck};
pub use preferences::{BudgetRange, Month, UserPreferences, WeatherCondition};
pub use recommendation::{Compatibility, RecommendationResponse, RecommendationScore, RecommendationSummary};
pub use registration::{NewRegistration, Registration, RegistrationForm, RegistrationStatus};
pub use training::{NewProgressEntry, ProgressEntry, ProgressStats, TrainingStats, TrainingStreak};
