// SPDX-License-Identifier: MIT

//! Firestore-backed preference store.
//!
//! One document per user in the `preferences` collection. Document IDs are
//! the URL-encoded email so that `/` and other reserved characters are safe.

use crate::db::{collections, user_key, PreferenceStore};
use crate::error::AppError;
use crate::models::UserPreferences;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Stored preference document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPreferences {
    pub user_email: String,
    pub preferences: UserPreferences,
    /// ISO 8601
    pub updated_at: String,
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Emulator connection with a dummy unsigned token.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Offline client for tests. Every operation fails with a database error.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

pub fn document_id(user: &str) -> String {
    urlencoding::encode(&user_key(user)).into_owned()
}

#[async_trait]
impl PreferenceStore for FirestoreDb {
    async fn get(&self, user: &str) -> Result<Option<UserPreferences>, AppError> {
        let stored: Option<StoredPreferences> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::PREFERENCES)
            .obj()
            .one(&document_id(user))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(stored.map(|s| s.preferences))
    }

    async fn put(&self, user: &str, prefs: &UserPreferences) -> Result<(), AppError> {
        let doc = StoredPreferences {
            user_email: user.to_string(),
            preferences: prefs.clone(),
            updated_at: crate::time_utils::now_rfc3339(),
        };

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::PREFERENCES)
            .document_id(document_id(user))
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!(user, "Stored preferences");
        Ok(())
    }

    async fn delete(&self, user: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::PREFERENCES)
            .document_id(document_id(user))
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_is_path_safe() {
        assert_eq!(document_id("Runner/One@Example.com"), "runner%2Fone%40example.com");
    }

    #[tokio::test]
    async fn test_offline_mode_reports_database_error() {
        let db = FirestoreDb::new_mock();
        let result = db.get("a@example.com").await;
        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
