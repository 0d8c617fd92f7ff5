// SPDX-License-Identifier: MIT

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use runlytic::config::Config;
use runlytic::db::{FirestoreDb, MemoryPreferenceStore};
use runlytic::error::{AppError, Result};
use runlytic::middleware::auth::create_jwt;
use runlytic::models::{
    Marathon, MarathonDraft, NewMarathon, NewProgressEntry, NewRegistration, ProgressEntry,
    ProgressStats, Registration, RegistrationForm, TrainingStats, TrainingStreak, WriteAck,
};
use runlytic::routes::create_router;
use runlytic::services::MarathonBackend;
use runlytic::AppState;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

// ─── Fake Backend ────────────────────────────────────────────

/// In-process stand-in for the marathon REST backend. Records every write.
#[derive(Default)]
pub struct FakeBackend {
    pub marathons: Mutex<Vec<Marathon>>,
    pub training: Mutex<Option<TrainingStats>>,
    pub registered: AtomicBool,
    pub pool_unavailable: AtomicBool,
    pub training_unavailable: AtomicBool,
    pub created_marathons: Mutex<Vec<NewMarathon>>,
    pub updated_marathons: Mutex<Vec<(String, MarathonDraft)>>,
    pub registrations: Mutex<Vec<NewRegistration>>,
    pub progress: Mutex<Vec<NewProgressEntry>>,
    pub progress_limits: Mutex<Vec<u32>>,
    pub tokens: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn with_marathons(marathons: Vec<Marathon>) -> Self {
        Self {
            marathons: Mutex::new(marathons),
            ..Default::default()
        }
    }

    fn seen(&self, token: &str) {
        self.tokens.lock().unwrap().push(token.to_string());
    }

    fn ack() -> WriteAck {
        WriteAck {
            acknowledged: true,
            inserted_id: Some("new-id".to_string()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl MarathonBackend for FakeBackend {
    async fn list_marathons(&self, token: &str) -> Result<Vec<Marathon>> {
        self.seen(token);
        if self.pool_unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Backend(AppError::BACKEND_STARTING.to_string()));
        }
        Ok(self.marathons.lock().unwrap().clone())
    }

    async fn featured_marathons(&self, token: &str) -> Result<Vec<Marathon>> {
        self.seen(token);
        Ok(self.marathons.lock().unwrap().iter().take(6).cloned().collect())
    }

    async fn upcoming_marathons(&self, token: &str) -> Result<Vec<Marathon>> {
        self.seen(token);
        let now = Utc::now();
        Ok(self
            .marathons
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.marathon_start_date > now)
            .cloned()
            .collect())
    }

    async fn organizer_marathons(&self, token: &str, email: &str) -> Result<Vec<Marathon>> {
        self.seen(token);
        Ok(self
            .marathons
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.organizer.as_deref() == Some(email))
            .cloned()
            .collect())
    }

    async fn get_marathon(&self, token: &str, id: &str) -> Result<Marathon> {
        self.seen(token);
        self.marathons
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Marathon {}", id)))
    }

    async fn create_marathon(&self, token: &str, marathon: &NewMarathon) -> Result<WriteAck> {
        self.seen(token);
        self.created_marathons.lock().unwrap().push(marathon.clone());
        Ok(Self::ack())
    }

    async fn update_marathon(
        &self,
        token: &str,
        id: &str,
        draft: &MarathonDraft,
    ) -> Result<WriteAck> {
        self.seen(token);
        self.updated_marathons
            .lock()
            .unwrap()
            .push((id.to_string(), draft.clone()));
        Ok(WriteAck {
            acknowledged: true,
            modified_count: Some(1),
            ..Default::default()
        })
    }

    async fn delete_marathon(&self, token: &str, id: &str) -> Result<WriteAck> {
        self.seen(token);
        self.marathons.lock().unwrap().retain(|m| m.id != id);
        Ok(WriteAck {
            acknowledged: true,
            deleted_count: Some(1),
            ..Default::default()
        })
    }

    async fn is_registered(&self, token: &str, _marathon_id: &str) -> Result<bool> {
        self.seen(token);
        Ok(self.registered.load(Ordering::SeqCst))
    }

    async fn create_registration(&self, token: &str, reg: &NewRegistration) -> Result<WriteAck> {
        self.seen(token);
        self.registrations.lock().unwrap().push(reg.clone());
        Ok(Self::ack())
    }

    async fn user_registrations(
        &self,
        token: &str,
        email: &str,
        search: Option<&str>,
    ) -> Result<Vec<Registration>> {
        self.seen(token);
        let registrations = self.registrations.lock().unwrap();
        Ok(registrations
            .iter()
            .enumerate()
            .filter(|(_, r)| r.user_email == email)
            .filter(|(_, r)| {
                search
                    .map(|s| r.marathon_title.to_lowercase().contains(&s.to_lowercase()))
                    .unwrap_or(true)
            })
            .map(|(i, r)| Registration {
                id: format!("r{}", i),
                marathon_id: r.marathon_id.clone(),
                marathon_title: r.marathon_title.clone(),
                marathon_start_date: Some(r.marathon_start_date),
                first_name: r.form.first_name.clone(),
                last_name: r.form.last_name.clone(),
                contact_no: r.form.contact_no.clone(),
                additional_info: r.form.additional_info.clone(),
                user_email: r.user_email.clone(),
                status: Default::default(),
                registered_at: Some(r.registered_at),
            })
            .collect())
    }

    async fn update_registration(
        &self,
        token: &str,
        _id: &str,
        _form: &RegistrationForm,
    ) -> Result<WriteAck> {
        self.seen(token);
        Ok(WriteAck {
            acknowledged: true,
            modified_count: Some(1),
            ..Default::default()
        })
    }

    async fn cancel_registration(&self, token: &str, _id: &str) -> Result<WriteAck> {
        self.seen(token);
        Ok(WriteAck {
            acknowledged: true,
            deleted_count: Some(1),
            ..Default::default()
        })
    }

    async fn list_progress(&self, token: &str, limit: u32) -> Result<Vec<ProgressEntry>> {
        self.seen(token);
        self.progress_limits.lock().unwrap().push(limit);
        Ok(vec![])
    }

    async fn log_progress(&self, token: &str, entry: &NewProgressEntry) -> Result<WriteAck> {
        self.seen(token);
        self.progress.lock().unwrap().push(entry.clone());
        Ok(Self::ack())
    }

    async fn progress_stats(&self, token: &str, _period_days: u32) -> Result<ProgressStats> {
        self.seen(token);
        Ok(ProgressStats::default())
    }

    async fn training_streak(&self, token: &str) -> Result<TrainingStreak> {
        self.seen(token);
        Ok(TrainingStreak { streak: 4 })
    }

    async fn training_stats(&self, token: &str) -> Result<Option<TrainingStats>> {
        self.seen(token);
        if self.training_unavailable.load(Ordering::SeqCst) {
            return Err(AppError::Backend("HTTP 500".to_string()));
        }
        Ok(self.training.lock().unwrap().clone())
    }
}

// ─── Fixtures ────────────────────────────────────────────────

/// A marathon whose registration window is currently open.
pub fn marathon(
    id: &str,
    title: &str,
    distance: &str,
    difficulty: &str,
    terrain: &str,
    price: f64,
    weather: &str,
) -> Marathon {
    let now = Utc::now();
    serde_json::from_value(json!({
        "_id": id,
        "title": title,
        "location": "Springfield",
        "image": "https://example.com/race.png",
        "startRegistrationDate": now - Duration::days(10),
        "endRegistrationDate": now + Duration::days(10),
        "marathonStartDate": now + Duration::days(30),
        "runningDistance": distance,
        "difficulty": difficulty,
        "terrain": terrain,
        "price": price,
        "weather": weather,
        "totalRegistrations": 0,
        "organizer": "organizer@example.com"
    }))
    .unwrap()
}

/// Same as [`marathon`] with an explicit registration window.
pub fn marathon_with_window(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Marathon {
    let mut m = marathon(id, "Windowed Run", "10k", "beginner", "flat", 50.0, "Sunny");
    m.start_registration_date = start;
    m.end_registration_date = end;
    m.marathon_start_date = end + Duration::days(14);
    m
}

// ─── App ─────────────────────────────────────────────────────

pub const TEST_EMAIL: &str = "runner@example.com";

/// Create a test JWT for `email` signed with `signing_key`.
pub fn create_test_jwt(email: &str, signing_key: &[u8]) -> String {
    create_jwt(email, Some("Test Runner"), signing_key, 86400).unwrap()
}

/// Create a test app over `backend` with in-memory preferences.
pub fn create_test_app_with(
    backend: Arc<FakeBackend>,
    config: Config,
) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(
        config,
        backend,
        Arc::new(MemoryPreferenceStore::new()),
    ));
    (create_router(state.clone()), state)
}

/// Create a test app with an empty fake backend.
/// Returns the router and the shared state.
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Arc::new(FakeBackend::default()), Config::default())
}

/// Read a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
