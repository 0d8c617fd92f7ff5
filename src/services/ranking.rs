// SPDX-License-Identifier: MIT

//! Ordering of scored candidates.

use crate::models::RecommendationScore;

/// Sort by score descending and keep the first `limit` entries.
///
/// `sort_by` is stable, so candidates with equal scores keep the order in
/// which they appeared in the pool.
pub fn rank(mut scores: Vec<RecommendationScore>, limit: usize) -> Vec<RecommendationScore> {
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    scores.truncate(limit);
    scores
}
