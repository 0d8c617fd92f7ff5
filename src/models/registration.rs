// SPDX-License-Identifier: MIT

//! Marathon registration (application) model.

use crate::models::Marathon;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Review status of a registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Stored registration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Registration {
    #[serde(rename = "_id")]
    pub id: String,
    pub marathon_id: String,
    #[serde(default)]
    pub marathon_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marathon_start_date: Option<DateTime<Utc>>,
    pub first_name: String,
    pub last_name: String,
    pub contact_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
    pub user_email: String,
    #[serde(default)]
    pub status: RegistrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

/// Applicant-editable fields, used for both registering and editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RegistrationForm {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Contact number is required"))]
    pub contact_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl RegistrationForm {
    /// Trim surrounding whitespace so blank input fails validation.
    pub fn normalized(mut self) -> Self {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.contact_no = self.contact_no.trim().to_string();
        self.additional_info = self
            .additional_info
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }
}

/// Body sent to `POST /registrations`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRegistration {
    #[serde(flatten)]
    pub form: RegistrationForm,
    pub marathon_id: String,
    pub marathon_title: String,
    pub marathon_start_date: DateTime<Utc>,
    pub user_email: String,
    pub registered_at: DateTime<Utc>,
}

impl NewRegistration {
    pub fn new(
        form: RegistrationForm,
        marathon: &Marathon,
        user_email: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            form,
            marathon_id: marathon.id.clone(),
            marathon_title: marathon.title.clone(),
            marathon_start_date: marathon.marathon_start_date,
            user_email: user_email.to_string(),
            registered_at: now,
        }
    }
}
