// SPDX-License-Identifier: MIT

//! Process-local preference store.

use crate::db::{user_key, PreferenceStore};
use crate::error::AppError;
use crate::models::UserPreferences;
use async_trait::async_trait;
use dashmap::DashMap;

/// Preferences held in memory, keyed like the Firestore store; lost on restart.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    entries: DashMap<String, UserPreferences>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn get(&self, user: &str) -> Result<Option<UserPreferences>, AppError> {
        Ok(self.entries.get(&user_key(user)).map(|entry| entry.value().clone()))
    }

    async fn put(&self, user: &str, prefs: &UserPreferences) -> Result<(), AppError> {
        self.entries.insert(user_key(user), prefs.clone());
        Ok(())
    }

    async fn delete(&self, user: &str) -> Result<(), AppError> {
        self.entries.remove(&user_key(user));
        Ok(())
    }
}
