// SPDX-License-Identifier: MIT

//! Marathon event model as served by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Race distance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RunningDistance {
    #[serde(rename = "3k")]
    ThreeK,
    #[serde(rename = "5k")]
    FiveK,
    #[serde(rename = "10k")]
    TenK,
    #[serde(rename = "21k")]
    TwentyOneK,
    #[serde(rename = "42k")]
    FortyTwoK,
}

impl RunningDistance {
    pub const ALL: [RunningDistance; 5] = [
        RunningDistance::ThreeK,
        RunningDistance::FiveK,
        RunningDistance::TenK,
        RunningDistance::TwentyOneK,
        RunningDistance::FortyTwoK,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RunningDistance::ThreeK => "3k",
            RunningDistance::FiveK => "5k",
            RunningDistance::TenK => "10k",
            RunningDistance::TwentyOneK => "21k",
            RunningDistance::FortyTwoK => "42k",
        }
    }
}

/// Course difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

/// Course terrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Terrain {
    Flat,
    Hilly,
    Mountain,
    Mixed,
}

impl Terrain {
    pub const ALL: [Terrain; 4] = [Terrain::Flat, Terrain::Hilly, Terrain::Mountain, Terrain::Mixed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Flat => "flat",
            Terrain::Hilly => "hilly",
            Terrain::Mountain => "mountain",
            Terrain::Mixed => "mixed",
        }
    }
}

/// Error returned when a string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! impl_str_enum {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_str_enum!(RunningDistance, "distance");
impl_str_enum!(Difficulty, "difficulty");
impl_str_enum!(Terrain, "terrain");

/// Marathon record from the backend (`/marathons`).
///
/// Enumerated fields the backend fills inconsistently are parsed leniently:
/// an unknown or malformed value becomes `None` so that one bad record does
/// not fail the whole candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marathon {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    pub start_registration_date: DateTime<Utc>,
    pub end_registration_date: DateTime<Utc>,
    pub marathon_start_date: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "lenient_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub running_distance: Option<RunningDistance>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub price: f64,
    #[serde(
        default,
        deserialize_with = "lenient_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
    #[serde(
        default,
        deserialize_with = "lenient_enum",
        skip_serializing_if = "Option::is_none"
    )]
    pub terrain: Option<Terrain>,
    /// Free-text forecast such as "Sunny".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default)]
    pub total_registrations: u32,
    /// Organizer email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Organizer-supplied fields for creating or updating a marathon.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarathonDraft {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(url(message = "Invalid URL"))]
    pub image: String,
    pub start_registration_date: DateTime<Utc>,
    pub end_registration_date: DateTime<Utc>,
    pub marathon_start_date: DateTime<Utc>,
    pub running_distance: RunningDistance,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Terrain>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Body sent to `POST /marathons`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMarathon {
    #[serde(flatten)]
    pub draft: MarathonDraft,
    pub organizer: String,
    pub created_at: DateTime<Utc>,
    pub total_registrations: u32,
}

impl NewMarathon {
    pub fn new(draft: MarathonDraft, organizer: &str, now: DateTime<Utc>) -> Self {
        Self {
            draft,
            organizer: organizer.to_string(),
            created_at: now,
            total_registrations: 0,
        }
    }
}

/// Acknowledgement returned by backend write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WriteAck {
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_count: Option<u64>,
}

fn lenient_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(|v| v.as_str())
        .and_then(|s| s.parse().ok()))
}

/// Numbers that may arrive as strings or null; anything unusable is 0.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}
