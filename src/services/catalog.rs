// SPDX-License-Identifier: MIT

//! Search, filter, and sort over the marathon list.

use crate::models::{Marathon, RunningDistance};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Sort key for the marathon catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSort {
    /// Marathon start date, newest first.
    #[default]
    Date,
    Title,
    /// Most registrations first.
    Registrations,
}

/// Query string for `GET /api/marathons`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
    /// `None` (or "all") means every distance.
    #[serde(default, deserialize_with = "distance_filter")]
    pub distance: Option<RunningDistance>,
    #[serde(default)]
    pub sort: CatalogSort,
}

fn distance_filter<'de, D>(deserializer: D) -> Result<Option<RunningDistance>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => RunningDistance::from_str(s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl CatalogQuery {
    pub fn matches(&self, marathon: &Marathon) -> bool {
        if let Some(distance) = self.distance {
            if marathon.running_distance != Some(distance) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => marathon
                .title
                .to_lowercase()
                .contains(&term.to_lowercase()),
            _ => true,
        }
    }

    /// Filter then sort. Sorting is stable.
    pub fn apply(&self, marathons: Vec<Marathon>) -> Vec<Marathon> {
        let mut result: Vec<Marathon> = marathons.into_iter().filter(|m| self.matches(m)).collect();
        match self.sort {
            CatalogSort::Date => {
                result.sort_by(|a, b| b.marathon_start_date.cmp(&a.marathon_start_date))
            }
            CatalogSort::Title => result.sort_by(|a, b| a.title.cmp(&b.title)),
            CatalogSort::Registrations => {
                result.sort_by(|a, b| b.total_registrations.cmp(&a.total_registrations))
            }
        }
        result
    }
}
