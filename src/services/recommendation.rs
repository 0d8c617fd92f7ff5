// SPDX-License-Identifier: MIT

//! One recommendation request, end to end.
//!
//! Candidate pool and training stats are fetched before scoring begins.
//! Scoring itself is synchronous and never fails.

use crate::error::Result;
use crate::models::{
    RecommendationResponse, RecommendationScore, RecommendationSummary, TrainingStats,
    UserPreferences,
};
use crate::services::backend::MarathonBackend;
use crate::services::{ranking, scoring};
use std::sync::Arc;

/// Score at or above which a recommendation counts as a perfect match.
pub const PERFECT_MATCH_SCORE: u32 = 80;

#[derive(Clone)]
pub struct RecommendationService {
    backend: Arc<dyn MarathonBackend>,
    fetch_training_stats: bool,
}

impl RecommendationService {
    pub fn new(backend: Arc<dyn MarathonBackend>, fetch_training_stats: bool) -> Self {
        Self {
            backend,
            fetch_training_stats,
        }
    }

    /// Rank the backend's marathons for a user.
    ///
    /// `training` overrides the training-stats lookup when supplied.
    pub async fn recommend(
        &self,
        token: &str,
        prefs: &UserPreferences,
        training: Option<TrainingStats>,
        limit: usize,
    ) -> Result<RecommendationResponse> {
        let pool = self.backend.list_marathons(token).await?;

        let training = match training {
            Some(stats) => Some(stats),
            None if self.fetch_training_stats => self.lookup_training(token).await,
            None => None,
        };

        let scores = scoring::score_all(prefs, &pool, training.as_ref());
        let recommendations = ranking::rank(scores, limit);
        let summary = summarize(&recommendations);

        tracing::debug!(
            pool = pool.len(),
            returned = recommendations.len(),
            top_score = summary.top_score,
            with_training = training.is_some(),
            "Scored recommendations"
        );

        Ok(RecommendationResponse {
            analysis: analysis(&summary, recommendations.len(), pool.len()),
            total_marathons: pool.len() as u32,
            timestamp: crate::time_utils::now_rfc3339(),
            summary,
            recommendations,
        })
    }

    /// Missing or failing training stats never fail the request.
    async fn lookup_training(&self, token: &str) -> Option<TrainingStats> {
        match self.backend.training_stats(token).await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::warn!(error = %e, "Training stats unavailable, scoring without pace bonus");
                None
            }
        }
    }
}

pub fn summarize(recommendations: &[RecommendationScore]) -> RecommendationSummary {
    RecommendationSummary {
        top_score: recommendations.first().map(|r| r.score).unwrap_or(0),
        perfect_matches: recommendations
            .iter()
            .filter(|r| r.score >= PERFECT_MATCH_SCORE)
            .count() as u32,
        weather_matches: recommendations
            .iter()
            .filter(|r| r.reasons.iter().any(|reason| reason.contains("weather")))
            .count() as u32,
    }
}

fn analysis(summary: &RecommendationSummary, returned: usize, pool: usize) -> String {
    if pool == 0 {
        return "No marathons are currently available.".to_string();
    }
    format!(
        "Evaluated {} marathons; top {} shown with a best score of {}. {} strong matches, {} with preferred weather.",
        pool, returned, summary.top_score, summary.perfect_matches, summary.weather_matches
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Compatibility;
    use serde_json::json;

    fn scored(score: u32, reasons: &[&str]) -> RecommendationScore {
        RecommendationScore {
            marathon: serde_json::from_value(json!({
                "_id": "m",
                "title": "m",
                "startRegistrationDate": "2025-01-01T00:00:00Z",
                "endRegistrationDate": "2025-02-01T00:00:00Z",
                "marathonStartDate": "2025-03-01T00:00:00Z"
            }))
            .unwrap(),
            score,
            reasons: reasons.iter().map(|s| s.to_string()).collect(),
            warnings: None,
            compatibility: Compatibility::default(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let recs = vec![
            scored(100, &["Expected weather matches preference (Sunny)"]),
            scored(80, &["Perfect distance match (10k)"]),
            scored(45, &["Expected weather matches preference (Cool)"]),
        ];

        let summary = summarize(&recs);

        assert_eq!(
            summary,
            RecommendationSummary {
                top_score: 100,
                perfect_matches: 2,
                weather_matches: 2
            }
        );
    }

    #[test]
    fn test_summary_of_nothing() {
        assert_eq!(summarize(&[]), RecommendationSummary::default());
    }

    #[test]
    fn test_analysis_mentions_counts() {
        let summary = RecommendationSummary {
            top_score: 90,
            perfect_matches: 1,
            weather_matches: 0,
        };
        let text = analysis(&summary, 6, 14);
        assert!(text.contains("14 marathons"));
        assert!(text.contains("best score of 90"));
        assert_eq!(
            analysis(&RecommendationSummary::default(), 0, 0),
            "No marathons are currently available."
        );
    }
}
