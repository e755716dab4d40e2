//! Testing utilities: fixtures and a controllable criterion evaluator.
//!
//! # Example
//!
//! ```rust,ignore
//! use callmatch_core::matching::{CriterionKind, MatchSelector};
//! use callmatch_core::testing::{fixtures, MockEvaluator};
//!
//! let selector = MatchSelector::with_evaluators(vec![Box::new(
//!     MockEvaluator::scoring(CriterionKind::FuzzyTitle, 0.65).failing_for("rec-2"),
//! )]);
//! let recordings = vec![fixtures::recording("rec-1", "Demo"), fixtures::recording("rec-2", "Demo")];
//! ```

mod mock_evaluator;

pub use mock_evaluator::MockEvaluator;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::matching::{RecordingCandidate, ScorecardEntry};

    /// Create a scorecard entry with only an identifier.
    pub fn entry(call_identifier: &str) -> ScorecardEntry {
        ScorecardEntry::new(call_identifier)
    }

    /// Create a scorecard entry with a call date and duration.
    pub fn dated_entry(
        call_identifier: &str,
        call_date: NaiveDate,
        duration_minutes: Option<f64>,
    ) -> ScorecardEntry {
        ScorecardEntry {
            call_identifier: call_identifier.to_string(),
            call_date: Some(call_date),
            duration_minutes,
            manager_notes: String::new(),
        }
    }

    /// Create a recording with reasonable defaults.
    ///
    /// Owned by `user-1`, created 2024-01-10 12:00 UTC, no call date,
    /// duration or transcript.
    pub fn recording(id: &str, title: &str) -> RecordingCandidate {
        recording_for_user(id, title, "user-1")
    }

    /// Create a recording owned by a specific user.
    pub fn recording_for_user(id: &str, title: &str, user_id: &str) -> RecordingCandidate {
        RecordingCandidate {
            id: id.to_string(),
            title: title.to_string(),
            user_id: user_id.to_string(),
            call_date: None,
            created_at: Utc
                .with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
                .single()
                .unwrap_or_default(),
            duration_seconds: None,
            transcript: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Create a recording with a call date and a duration in minutes.
    pub fn dated_recording(
        id: &str,
        title: &str,
        call_date: NaiveDate,
        duration_minutes: Option<f64>,
    ) -> RecordingCandidate {
        let mut recording = recording(id, title);
        recording.call_date = Some(call_date);
        recording.duration_seconds = duration_minutes.map(|m| m * 60.0);
        recording
    }
}
