// SPDX-License-Identifier: MIT

//! Preference persistence (Firestore or in-memory).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryPreferenceStore;

use crate::error::AppError;
use crate::models::UserPreferences;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// User preferences (keyed by URL-encoded email)
    pub const PREFERENCES: &str = "preferences";
}

/// Canonical store key for a user; email addresses compare case-insensitively.
pub fn user_key(user: &str) -> String {
    user.to_lowercase()
}

/// Per-user preference storage.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, user: &str) -> Result<Option<UserPreferences>, AppError>;

    async fn put(&self, user: &str, prefs: &UserPreferences) -> Result<(), AppError>;

    /// Removing preferences that were never stored is not an error.
    async fn delete(&self, user: &str) -> Result<(), AppError>;
}
