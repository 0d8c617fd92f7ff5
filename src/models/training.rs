// SPDX-License-Identifier: MIT

//! Training log and progress aggregates.

use crate::models::marathon::lenient_number;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Training statistics used to personalize recommendations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainingStats {
    /// Average pace in minutes per kilometer (0 when unknown).
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_pace: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_activities: Option<u32>,
}

/// Kind of logged activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ProgressType {
    Run,
    Walk,
    CrossTraining,
    Rest,
}

/// Stored training log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ProgressType,
    /// Kilometers
    #[serde(default)]
    pub distance: f64,
    /// Minutes
    #[serde(default)]
    pub duration: f64,
    /// Minutes per kilometer
    #[serde(default)]
    pub pace: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default)]
    pub is_rest_day: bool,
    pub date: DateTime<Utc>,
}

/// New training log entry submitted by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NewProgressEntry {
    #[serde(rename = "type")]
    pub kind: ProgressType,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Distance cannot be negative"))]
    pub distance: f64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Duration cannot be negative"))]
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5, message = "Difficulty must be 1-5"))]
    pub difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default)]
    pub is_rest_day: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl NewProgressEntry {
    /// Fill in derived fields: pace from distance and duration, and the
    /// entry date if the client omitted it.
    pub fn completed(mut self, now: DateTime<Utc>) -> Self {
        if self.pace.is_none() {
            self.pace = derive_pace(self.distance, self.duration);
        }
        if self.date.is_none() {
            self.date = Some(now);
        }
        self
    }
}

/// Pace in min/km rounded to two decimals, if both inputs are positive.
pub fn derive_pace(distance_km: f64, duration_min: f64) -> Option<f64> {
    if distance_km > 0.0 && duration_min > 0.0 {
        Some((duration_min / distance_km * 100.0).round() / 100.0)
    } else {
        None
    }
}

/// Lifetime totals in a stats response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TotalStats {
    pub total_distance: f64,
    pub total_duration: f64,
    pub total_activities: u32,
    pub average_pace: f64,
    pub average_difficulty: f64,
}

/// Per-activity-type totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TypeBreakdown {
    #[serde(rename = "_id")]
    pub kind: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub total_duration: f64,
}

/// ISO year/week key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekKey {
    pub year: i32,
    pub week: u32,
}

/// One week of the weekly progress series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyProgress {
    #[serde(rename = "_id")]
    pub week: WeekKey,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub total_duration: f64,
    #[serde(default)]
    pub activity_count: u32,
}

/// Aggregate progress statistics for a trailing period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressStats {
    pub total_stats: TotalStats,
    pub type_breakdown: Vec<TypeBreakdown>,
    pub weekly_progress: Vec<WeeklyProgress>,
}

/// Consecutive training days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainingStreak {
    #[serde(default)]
    pub streak: u32,
}
