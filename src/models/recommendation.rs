// SPDX-License-Identifier: MIT

//! Recommendation scores and responses.

use crate::models::Marathon;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Per-dimension compatibility percentages (0-100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Compatibility {
    pub distance: f64,
    pub difficulty: f64,
    pub budget: f64,
}

/// One scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecommendationScore {
    pub marathon: Marathon,
    /// Clamped to 0-100.
    pub score: u32,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
    pub compatibility: Compatibility,
}

/// Counts behind the recommendation overview cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecommendationSummary {
    pub top_score: u32,
    pub perfect_matches: u32,
    pub weather_matches: u32,
}

/// Response body for recommendation requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationScore>,
    pub analysis: String,
    pub total_marathons: u32,
    pub timestamp: String,
    pub summary: RecommendationSummary,
}
