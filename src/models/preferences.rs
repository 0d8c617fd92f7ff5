// SPDX-License-Identifier: MIT

//! User recommendation preferences.

use crate::models::marathon::{Difficulty, RunningDistance, Terrain, UnknownVariant};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Weather conditions a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WeatherCondition {
    Sunny,
    Cloudy,
    Cool,
    Warm,
    Rainy,
    Any,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 6] = [
        WeatherCondition::Sunny,
        WeatherCondition::Cloudy,
        WeatherCondition::Cool,
        WeatherCondition::Warm,
        WeatherCondition::Rainy,
        WeatherCondition::Any,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Sunny => "sunny",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Cool => "cool",
            WeatherCondition::Warm => "warm",
            WeatherCondition::Rainy => "rainy",
            WeatherCondition::Any => "any",
        }
    }
}

impl FromStr for WeatherCondition {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownVariant {
                kind: "weather",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar month, serialized by English name ("January").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Inclusive price interval `[min, max]`, serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl From<(f64, f64)> for BudgetRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<BudgetRange> for (f64, f64) {
    fn from(range: BudgetRange) -> Self {
        (range.min, range.max)
    }
}

/// Errors from preference validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreferenceError {
    #[error("Budget minimum must not exceed maximum")]
    InvertedBudget,

    #[error("Budget bounds must be non-negative")]
    NegativeBudget,

    #[error("Max travel distance must be non-negative")]
    NegativeTravelDistance,
}

/// A user's stated preferences for marathon recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserPreferences {
    pub preferred_distance: Vec<RunningDistance>,
    /// Kilometers. Stored for the client; not scored.
    pub max_travel_distance: f64,
    pub preferred_difficulty: Vec<Difficulty>,
    pub preferred_terrain: Vec<Terrain>,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    pub budget_range: BudgetRange,
    /// Stored for the client; not scored.
    pub preferred_months: Vec<Month>,
    pub weather_preference: Vec<WeatherCondition>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            preferred_distance: vec![RunningDistance::TenK, RunningDistance::TwentyOneK],
            max_travel_distance: 100.0,
            preferred_difficulty: vec![Difficulty::Beginner, Difficulty::Intermediate],
            preferred_terrain: vec![Terrain::Flat, Terrain::Mixed],
            budget_range: BudgetRange::new(0.0, 200.0),
            preferred_months: vec![],
            weather_preference: vec![WeatherCondition::Sunny, WeatherCondition::Cloudy],
        }
    }
}

impl UserPreferences {
    /// Check invariants the scoring engine relies on.
    pub fn validate(&self) -> Result<(), PreferenceError> {
        if self.budget_range.min < 0.0 || self.budget_range.max < 0.0 {
            return Err(PreferenceError::NegativeBudget);
        }
        if self.budget_range.min > self.budget_range.max {
            return Err(PreferenceError::InvertedBudget);
        }
        if self.max_travel_distance < 0.0 {
            return Err(PreferenceError::NegativeTravelDistance);
        }
        Ok(())
    }

    /// True if the free-text weather descriptor names a preferred condition.
    pub fn prefers_weather(&self, descriptor: &str) -> bool {
        descriptor
            .parse::<WeatherCondition>()
            .map(|w| self.weather_preference.contains(&w))
            .unwrap_or(false)
    }
}
