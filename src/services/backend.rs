// SPDX-License-Identifier: MIT

//! Client for the marathon REST backend.
//!
//! Every call forwards the caller's bearer token. Reads are retried on
//! transient failures; writes are sent exactly once.
//!
//! Status mapping:
//! - 401/403 → `Unauthorized`
//! - 404 → `NotFound`
//! - other 4xx → `BadRequest` (backend `message` when present)
//! - 5xx, transport errors, HTML bodies → `Backend`
//! - undecodable 2xx bodies → `MalformedResponse` (not retried)
//!
//! List endpoints drop individual records that fail to decode rather than
//! failing the whole list.

use crate::error::{AppError, Result};
use crate::models::{
    Marathon, MarathonDraft, NewMarathon, NewProgressEntry, NewRegistration, ProgressEntry,
    ProgressStats, Registration, RegistrationForm, TrainingStats, TrainingStreak, WriteAck,
};
use crate::services::retry::RetryConfig;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// Operations the service needs from the marathon backend.
#[async_trait]
pub trait MarathonBackend: Send + Sync {
    async fn list_marathons(&self, token: &str) -> Result<Vec<Marathon>>;
    async fn featured_marathons(&self, token: &str) -> Result<Vec<Marathon>>;
    async fn upcoming_marathons(&self, token: &str) -> Result<Vec<Marathon>>;
    async fn organizer_marathons(&self, token: &str, email: &str) -> Result<Vec<Marathon>>;
    async fn get_marathon(&self, token: &str, id: &str) -> Result<Marathon>;
    async fn create_marathon(&self, token: &str, marathon: &NewMarathon) -> Result<WriteAck>;
    async fn update_marathon(&self, token: &str, id: &str, draft: &MarathonDraft)
        -> Result<WriteAck>;
    async fn delete_marathon(&self, token: &str, id: &str) -> Result<WriteAck>;

    async fn is_registered(&self, token: &str, marathon_id: &str) -> Result<bool>;
    async fn create_registration(&self, token: &str, reg: &NewRegistration) -> Result<WriteAck>;
    async fn user_registrations(
        &self,
        token: &str,
        email: &str,
        search: Option<&str>,
    ) -> Result<Vec<Registration>>;
    async fn update_registration(
        &self,
        token: &str,
        id: &str,
        form: &RegistrationForm,
    ) -> Result<WriteAck>;
    async fn cancel_registration(&self, token: &str, id: &str) -> Result<WriteAck>;

    async fn list_progress(&self, token: &str, limit: u32) -> Result<Vec<ProgressEntry>>;
    async fn log_progress(&self, token: &str, entry: &NewProgressEntry) -> Result<WriteAck>;
    async fn progress_stats(&self, token: &str, period_days: u32) -> Result<ProgressStats>;
    async fn training_streak(&self, token: &str) -> Result<TrainingStreak>;

    /// `None` when the backend has no training stats endpoint or no data.
    async fn training_stats(&self, token: &str) -> Result<Option<TrainingStats>>;
}

/// Error payload the backend sends with 4xx responses.
#[derive(Debug, Deserialize)]
struct BackendMessage {
    #[serde(alias = "error")]
    message: String,
}

/// `/applications/check/{id}` answers with either a bare bool or an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistrationCheck {
    Flag(bool),
    #[serde(rename_all = "camelCase")]
    Object {
        is_registered: bool,
    },
}

impl From<RegistrationCheck> for bool {
    fn from(check: RegistrationCheck) -> bool {
        match check {
            RegistrationCheck::Flag(b) => b,
            RegistrationCheck::Object { is_registered } => is_registered,
        }
    }
}

/// `reqwest` implementation of [`MarathonBackend`].
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration, max_retries: u32) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryConfig {
                max_retries: max_retries.max(1),
                ..Default::default()
            },
        })
    }

    /// Override the backoff schedule.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET with retry on transient failures.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path);
        let url = url.as_str();
        let http = &self.http;
        self.retry
            .execute(move || async move {
                let response = http
                    .get(url)
                    .bearer_auth(token)
                    .query(query)
                    .send()
                    .await
                    .map_err(transport_error)?;
                check_response_json(response).await
            })
            .await
    }

    /// GET a JSON array, skipping elements that don't decode as `T`.
    async fn get_records<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let raw: Vec<serde_json::Value> = self.get_json(path, token, query).await?;
        Ok(decode_records(path, raw))
    }

    async fn send_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        token: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let mut request = self.http.request(method, self.url(path)).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(transport_error)?;
        check_response_json(response).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, token: &str, body: &B) -> Result<WriteAck> {
        self.send_json(reqwest::Method::POST, path, token, Some(body)).await
    }

    async fn patch<B: Serialize + Sync>(&self, path: &str, token: &str, body: &B) -> Result<WriteAck> {
        self.send_json(reqwest::Method::PATCH, path, token, Some(body)).await
    }

    async fn delete(&self, path: &str, token: &str) -> Result<WriteAck> {
        self.send_json::<(), _>(reqwest::Method::DELETE, path, token, None)
            .await
    }
}

fn decode_records<T: DeserializeOwned>(path: &str, raw: Vec<serde_json::Value>) -> Vec<T> {
    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(path, error = %e, "Skipping undecodable backend record");
                None
            }
        })
        .collect();
    if records.len() < total {
        tracing::warn!(path, total, kept = records.len(), "Backend list partially decoded");
    }
    records
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn transport_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Backend("Backend request timed out".to_string())
    } else {
        AppError::Backend(err.to_string())
    }
}

fn looks_like_html(body: &str) -> bool {
    body.trim_start().starts_with('<')
}

/// Map a non-success status to an application error.
fn status_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<BackendMessage>(body)
        .map(|m| m.message)
        .unwrap_or_else(|_| format!("HTTP {}", status));

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized,
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        s if s.is_client_error() => AppError::BadRequest(message),
        _ if looks_like_html(body) => AppError::Backend(AppError::BACKEND_STARTING.to_string()),
        _ => AppError::Backend(format!("HTTP {}: {}", status, message)),
    }
}

/// Check response status and parse the JSON body.
async fn check_response_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(status_error(status, &body));
    }

    if looks_like_html(&body) {
        tracing::warn!("Backend returned HTML instead of JSON");
        return Err(AppError::Backend(AppError::BACKEND_STARTING.to_string()));
    }

    serde_json::from_str(&body).map_err(|e| AppError::MalformedResponse(e.to_string()))
}

#[async_trait]
impl MarathonBackend for BackendClient {
    async fn list_marathons(&self, token: &str) -> Result<Vec<Marathon>> {
        self.get_records("/marathons", token, &[]).await
    }

    async fn featured_marathons(&self, token: &str) -> Result<Vec<Marathon>> {
        self.get_records("/marathons/featured", token, &[]).await
    }

    async fn upcoming_marathons(&self, token: &str) -> Result<Vec<Marathon>> {
        self.get_records("/marathons/upcoming", token, &[]).await
    }

    async fn organizer_marathons(&self, token: &str, email: &str) -> Result<Vec<Marathon>> {
        let path = format!("/marathons/organizer/{}", segment(email));
        self.get_records(&path, token, &[]).await
    }

    async fn get_marathon(&self, token: &str, id: &str) -> Result<Marathon> {
        let path = format!("/marathons/{}", segment(id));
        self.get_json(&path, token, &[]).await
    }

    async fn create_marathon(&self, token: &str, marathon: &NewMarathon) -> Result<WriteAck> {
        self.post("/marathons", token, marathon).await
    }

    async fn update_marathon(
        &self,
        token: &str,
        id: &str,
        draft: &MarathonDraft,
    ) -> Result<WriteAck> {
        let path = format!("/marathons/{}", segment(id));
        self.patch(&path, token, draft).await
    }

    async fn delete_marathon(&self, token: &str, id: &str) -> Result<WriteAck> {
        let path = format!("/marathons/{}", segment(id));
        self.delete(&path, token).await
    }

    async fn is_registered(&self, token: &str, marathon_id: &str) -> Result<bool> {
        let path = format!("/applications/check/{}", segment(marathon_id));
        let check: RegistrationCheck = self.get_json(&path, token, &[]).await?;
        Ok(check.into())
    }

    async fn create_registration(&self, token: &str, reg: &NewRegistration) -> Result<WriteAck> {
        self.post("/registrations", token, reg).await
    }

    async fn user_registrations(
        &self,
        token: &str,
        email: &str,
        search: Option<&str>,
    ) -> Result<Vec<Registration>> {
        let path = format!("/registrations/user/{}", segment(email));
        let query: Vec<(&str, String)> = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| vec![("search", s.to_string())])
            .unwrap_or_default();
        self.get_records(&path, token, &query).await
    }

    async fn update_registration(
        &self,
        token: &str,
        id: &str,
        form: &RegistrationForm,
    ) -> Result<WriteAck> {
        let path = format!("/registrations/{}", segment(id));
        self.patch(&path, token, form).await
    }

    async fn cancel_registration(&self, token: &str, id: &str) -> Result<WriteAck> {
        let path = format!("/registrations/{}", segment(id));
        self.delete(&path, token).await
    }

    async fn list_progress(&self, token: &str, limit: u32) -> Result<Vec<ProgressEntry>> {
        self.get_records("/progress", token, &[("limit", limit.to_string())])
            .await
    }

    async fn log_progress(&self, token: &str, entry: &NewProgressEntry) -> Result<WriteAck> {
        self.post("/progress", token, entry).await
    }

    async fn progress_stats(&self, token: &str, period_days: u32) -> Result<ProgressStats> {
        self.get_json("/progress/stats", token, &[("period", period_days.to_string())])
            .await
    }

    async fn training_streak(&self, token: &str) -> Result<TrainingStreak> {
        self.get_json("/progress/streak", token, &[]).await
    }

    async fn training_stats(&self, token: &str) -> Result<Option<TrainingStats>> {
        match self.get_json("/training/user-stats", token, &[]).await {
            Ok(stats) => Ok(Some(stats)),
            Err(AppError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, ""),
            AppError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, "{\"message\":\"forbidden access\"}"),
            AppError::Unauthorized
        ));
        assert!(matches!(
            status_error(StatusCode::NOT_FOUND, ""),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, "oops"),
            AppError::Backend(_)
        ));
    }

    #[test]
    fn test_client_error_keeps_backend_message() {
        match status_error(StatusCode::CONFLICT, r#"{"message":"Already registered"}"#) {
            AppError::BadRequest(msg) => assert_eq!(msg, "Already registered"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_html_server_error_means_starting() {
        match status_error(StatusCode::SERVICE_UNAVAILABLE, "<!DOCTYPE html><html>") {
            AppError::Backend(msg) => assert_eq!(msg, AppError::BACKEND_STARTING),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_registration_check_shapes() {
        let flag: RegistrationCheck = serde_json::from_str("true").unwrap();
        assert!(bool::from(flag));
        let object: RegistrationCheck = serde_json::from_str(r#"{"isRegistered":false}"#).unwrap();
        assert!(!bool::from(object));
    }

    #[test]
    fn test_decode_records_skips_bad_entries() {
        let raw = vec![
            serde_json::json!({ "isRegistered": true }),
            serde_json::json!("not an object"),
            serde_json::json!(false),
        ];
        let decoded: Vec<RegistrationCheck> = decode_records("/check", raw);
        assert_eq!(decoded.len(), 2);
    }

    #[test]
    fn test_segment_encodes_email() {
        assert_eq!(segment("a+b@example.com"), "a%2Bb%40example.com");
    }
}
