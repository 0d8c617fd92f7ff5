// SPDX-License-Identifier: MIT

//! Marathon recommendation scoring.
//!
//! A weighted additive heuristic over the user's stated preferences:
//!
//! | Criterion  | Points | Compatibility tracked |
//! |------------|--------|-----------------------|
//! | Distance   | 30     | yes                   |
//! | Difficulty | 25     | yes                   |
//! | Budget     | 20     | yes (linear penalty)  |
//! | Weather    | 15     | no                    |
//! | Terrain    | 10     | no                    |
//! | Pace bonus | 20     | no                    |
//!
//! The total is clamped to 100. Scoring is pure: the same inputs always
//! produce the same output, and absent optional fields skip their addend.

use crate::models::{
    Compatibility, Difficulty, Marathon, RecommendationScore, TrainingStats, UserPreferences,
};

pub const DISTANCE_POINTS: u32 = 30;
pub const DIFFICULTY_POINTS: u32 = 25;
pub const BUDGET_POINTS: u32 = 20;
pub const WEATHER_POINTS: u32 = 15;
pub const TERRAIN_POINTS: u32 = 10;
pub const PACE_POINTS: u32 = 20;

pub const MAX_SCORE: u32 = 100;

/// Compatibility reported for a dimension that matches.
const FULL_MATCH: f64 = 100.0;
/// Compatibility reported for a distance or difficulty mismatch.
const PARTIAL_MATCH: f64 = 50.0;
/// Compatibility lost per currency unit outside the budget.
const BUDGET_PENALTY_PER_UNIT: f64 = 2.0;
/// Allowed distance (min/km) between observed and target pace.
const PACE_TOLERANCE: f64 = 1.0;

/// Target race pace in min/km for a difficulty level.
pub fn target_pace(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Beginner => 6.0,
        Difficulty::Intermediate => 5.0,
        Difficulty::Advanced => 4.0,
    }
}

/// Budget compatibility for a price: 100 inside the range, otherwise a
/// linear penalty on the distance from the range maximum, floored at 0.
pub fn budget_compatibility(prefs: &UserPreferences, price: f64) -> f64 {
    if prefs.budget_range.contains(price) {
        FULL_MATCH
    } else {
        (FULL_MATCH - (price - prefs.budget_range.max).abs() * BUDGET_PENALTY_PER_UNIT).max(0.0)
    }
}

/// Score one candidate against a user's preferences.
pub fn score(
    prefs: &UserPreferences,
    marathon: &Marathon,
    training: Option<&TrainingStats>,
) -> RecommendationScore {
    let mut points = 0u32;
    let mut reasons = Vec::new();
    let mut compatibility = Compatibility::default();

    match marathon.running_distance {
        Some(distance) if prefs.preferred_distance.contains(&distance) => {
            points += DISTANCE_POINTS;
            compatibility.distance = FULL_MATCH;
            reasons.push(format!("Perfect distance match ({})", distance));
        }
        _ => compatibility.distance = PARTIAL_MATCH,
    }

    match marathon.difficulty {
        Some(difficulty) if prefs.preferred_difficulty.contains(&difficulty) => {
            points += DIFFICULTY_POINTS;
            compatibility.difficulty = FULL_MATCH;
            reasons.push(format!("Matches your skill level ({})", difficulty));
        }
        _ => compatibility.difficulty = PARTIAL_MATCH,
    }

    compatibility.budget = budget_compatibility(prefs, marathon.price);
    if prefs.budget_range.contains(marathon.price) {
        points += BUDGET_POINTS;
        reasons.push(format!("Within your budget (${})", marathon.price));
    }

    if let Some(weather) = marathon.weather.as_deref() {
        if prefs.prefers_weather(weather) {
            points += WEATHER_POINTS;
            reasons.push(format!("Expected weather matches preference ({})", weather));
        }
    }

    if let Some(terrain) = marathon.terrain {
        if prefs.preferred_terrain.contains(&terrain) {
            points += TERRAIN_POINTS;
            reasons.push(format!("Preferred terrain ({})", terrain));
        }
    }

    if let (Some(stats), Some(difficulty)) = (training, marathon.difficulty) {
        let avg = stats.average_pace;
        if avg > 0.0 && (avg - target_pace(difficulty)).abs() <= PACE_TOLERANCE {
            points += PACE_POINTS;
            reasons.push("Pace matches your training level".to_string());
        }
    }

    RecommendationScore {
        marathon: marathon.clone(),
        score: points.min(MAX_SCORE),
        reasons,
        warnings: None,
        compatibility,
    }
}

/// Score every candidate in pool order.
pub fn score_all(
    prefs: &UserPreferences,
    pool: &[Marathon],
    training: Option<&TrainingStats>,
) -> Vec<RecommendationScore> {
    pool.iter().map(|m| score(prefs, m, training)).collect()
}
