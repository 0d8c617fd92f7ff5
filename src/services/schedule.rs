// SPDX-License-Identifier: MIT

//! Registration window rules.

use crate::error::AppError;
use crate::models::{Marathon, MarathonDraft};
use chrono::{DateTime, Utc};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Start registration date cannot be in the past")]
    RegistrationStartsInPast,

    #[error("End registration date must be after start registration date")]
    RegistrationEndsBeforeStart,

    #[error("Marathon start date must be after end registration date")]
    RaceBeforeRegistrationEnds,
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Check date ordering of a marathon before it is created or updated.
pub fn validate_schedule(draft: &MarathonDraft, now: DateTime<Utc>) -> Result<(), ScheduleError> {
    if draft.start_registration_date < now {
        return Err(ScheduleError::RegistrationStartsInPast);
    }
    validate_window_order(draft)
}

/// Ordering checks only. Used when an update keeps an opening date that
/// has already passed.
pub fn validate_window_order(draft: &MarathonDraft) -> Result<(), ScheduleError> {
    if draft.end_registration_date <= draft.start_registration_date {
        return Err(ScheduleError::RegistrationEndsBeforeStart);
    }
    if draft.marathon_start_date <= draft.end_registration_date {
        return Err(ScheduleError::RaceBeforeRegistrationEnds);
    }
    Ok(())
}

/// Where a marathon is in its registration lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum RegistrationPhase {
    NotStarted,
    Open,
    Closed,
}

impl RegistrationPhase {
    /// Human-readable reason registration is unavailable, if it is.
    pub fn rejection(&self) -> Option<&'static str> {
        match self {
            RegistrationPhase::NotStarted => Some("Registration has not started yet"),
            RegistrationPhase::Open => None,
            RegistrationPhase::Closed => Some("Registration is closed"),
        }
    }
}

/// Both window bounds are inclusive.
pub fn registration_phase(marathon: &Marathon, now: DateTime<Utc>) -> RegistrationPhase {
    if now < marathon.start_registration_date {
        RegistrationPhase::NotStarted
    } else if now <= marathon.end_registration_date {
        RegistrationPhase::Open
    } else {
        RegistrationPhase::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunningDistance;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap()
    }

    fn draft(start: DateTime<Utc>, end: DateTime<Utc>, race: DateTime<Utc>) -> MarathonDraft {
        MarathonDraft {
            title: "Harbor Half".to_string(),
            location: "Harbor".to_string(),
            description: "Flat and fast".to_string(),
            image: "https://example.com/h.png".to_string(),
            start_registration_date: start,
            end_registration_date: end,
            marathon_start_date: race,
            running_distance: RunningDistance::TwentyOneK,
            price: 40.0,
            difficulty: None,
            terrain: None,
            weather: None,
            amenities: vec![],
        }
    }

    #[test]
    fn test_valid_schedule() {
        let d = draft(now(), now() + Duration::days(10), now() + Duration::days(20));
        assert_eq!(validate_schedule(&d, now()), Ok(()));
    }

    #[test]
    fn test_start_in_past() {
        let d = draft(
            now() - Duration::days(1),
            now() + Duration::days(10),
            now() + Duration::days(20),
        );
        let err = validate_schedule(&d, now()).unwrap_err();
        assert_eq!(err.to_string(), "Start registration date cannot be in the past");
    }

    #[test]
    fn test_end_not_after_start() {
        let start = now() + Duration::days(1);
        let d = draft(start, start, now() + Duration::days(20));
        assert_eq!(
            validate_schedule(&d, now()),
            Err(ScheduleError::RegistrationEndsBeforeStart)
        );
    }

    #[test]
    fn test_race_not_after_end() {
        let d = draft(
            now() + Duration::days(1),
            now() + Duration::days(10),
            now() + Duration::days(5),
        );
        assert_eq!(
            validate_schedule(&d, now()).unwrap_err().to_string(),
            "Marathon start date must be after end registration date"
        );
    }

    #[test]
    fn test_window_order_ignores_past_start() {
        let d = draft(
            now() - Duration::days(30),
            now() + Duration::days(10),
            now() + Duration::days(20),
        );
        assert_eq!(validate_window_order(&d), Ok(()));
    }

    #[test]
    fn test_phase_bounds_inclusive() {
        let marathon: Marathon = serde_json::from_value(json!({
            "_id": "m1",
            "title": "Harbor Half",
            "startRegistrationDate": "2025-05-01T00:00:00Z",
            "endRegistrationDate": "2025-05-31T00:00:00Z",
            "marathonStartDate": "2025-06-15T06:00:00Z"
        }))
        .unwrap();
        let start = marathon.start_registration_date;
        let end = marathon.end_registration_date;

        assert_eq!(
            registration_phase(&marathon, start - Duration::seconds(1)),
            RegistrationPhase::NotStarted
        );
        assert_eq!(registration_phase(&marathon, start), RegistrationPhase::Open);
        assert_eq!(registration_phase(&marathon, end), RegistrationPhase::Open);
        assert_eq!(
            registration_phase(&marathon, end + Duration::seconds(1)),
            RegistrationPhase::Closed
        );
    }

    #[test]
    fn test_schedule_error_maps_to_bad_request() {
        let err: AppError = ScheduleError::RegistrationStartsInPast.into();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
