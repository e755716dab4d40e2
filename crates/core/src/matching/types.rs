//! Shared types for scorecard matching.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One externally sourced scorecard row referencing a call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardEntry {
    /// Loose identifier for the call (required, non-empty).
    pub call_identifier: String,
    /// Date the call took place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_date: Option<NaiveDate>,
    /// Call length in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Free-form coaching notes. May be empty.
    #[serde(default)]
    pub manager_notes: String,
}

impl ScorecardEntry {
    /// Create an entry with only an identifier.
    pub fn new(call_identifier: impl Into<String>) -> Self {
        Self {
            call_identifier: call_identifier.into(),
            call_date: None,
            duration_minutes: None,
            manager_notes: String::new(),
        }
    }
}

/// A recording already in the system, considered as the referent of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingCandidate {
    pub id: String,
    pub title: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_date: Option<NaiveDate>,
    /// Fallback date source when `call_date` is missing.
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    /// Opaque caller metadata, carried through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl RecordingCandidate {
    /// The call date, or the creation date when no call date was recorded.
    pub fn effective_date(&self) -> NaiveDate {
        self.call_date.unwrap_or_else(|| self.created_at.date_naive())
    }
}

/// The independent signals used to judge a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    ExactId,
    FuzzyTitle,
    DateProximity,
    DurationSimilarity,
    ContentSimilarity,
}

impl CriterionKind {
    /// All criteria, in evaluation order.
    pub const ALL: [CriterionKind; 5] = [
        CriterionKind::ExactId,
        CriterionKind::FuzzyTitle,
        CriterionKind::DateProximity,
        CriterionKind::DurationSimilarity,
        CriterionKind::ContentSimilarity,
    ];

    /// Short human-readable reason used when this criterion drives a match.
    pub fn label(&self) -> &'static str {
        match self {
            CriterionKind::ExactId => "Exact ID match",
            CriterionKind::FuzzyTitle => "Similar title",
            CriterionKind::DateProximity => "Matching date",
            CriterionKind::DurationSimilarity => "Similar duration",
            CriterionKind::ContentSimilarity => "Similar content",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CriterionKind::ExactId => "exact_id",
            CriterionKind::FuzzyTitle => "fuzzy_title",
            CriterionKind::DateProximity => "date_proximity",
            CriterionKind::DurationSimilarity => "duration_similarity",
            CriterionKind::ContentSimilarity => "content_similarity",
        }
    }
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw output of a single criterion evaluator, before weighting.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionOutcome {
    pub matched: bool,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Audit string, never used for logic.
    pub details: String,
}

impl CriterionOutcome {
    pub fn matched(confidence: f64, details: impl Into<String>) -> Self {
        Self {
            matched: true,
            confidence: confidence.clamp(0.0, 1.0),
            details: details.into(),
        }
    }

    pub fn unmatched(confidence: f64, details: impl Into<String>) -> Self {
        Self {
            matched: false,
            confidence: confidence.clamp(0.0, 1.0),
            details: details.into(),
        }
    }
}

/// One evaluated criterion for an entry/recording pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCriterion {
    #[serde(rename = "type")]
    pub kind: CriterionKind,
    pub matched: bool,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Weight taken from the config (`>= 0`).
    pub weight: f64,
    pub details: String,
}

impl MatchCriterion {
    pub fn from_outcome(kind: CriterionKind, outcome: CriterionOutcome, weight: f64) -> Self {
        Self {
            kind,
            matched: outcome.matched,
            confidence: outcome.confidence,
            weight,
            details: outcome.details,
        }
    }
}

/// A runner-up candidate for an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeMatch {
    pub recording: RecordingCandidate,
    pub confidence: f64,
    pub reason: String,
    pub criteria: Vec<MatchCriterion>,
}

/// Outcome of matching one entry against the candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub entry: ScorecardEntry,
    /// Best candidate, `None` when nothing reached the manual review floor.
    pub matched_recording: Option<RecordingCandidate>,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Criteria of the best candidate.
    pub criteria: Vec<MatchCriterion>,
    /// Runner-ups sorted by confidence descending.
    pub alternatives: Vec<AlternativeMatch>,
    pub requires_manual_review: bool,
    pub match_reason: String,
}

impl MatchResult {
    /// A result carrying no candidate at all.
    pub fn no_match(entry: ScorecardEntry, reason: impl Into<String>) -> Self {
        Self {
            entry,
            matched_recording: None,
            confidence: 0.0,
            criteria: Vec::new(),
            alternatives: Vec::new(),
            requires_manual_review: false,
            match_reason: reason.into(),
        }
    }

    /// True when the result was decided by the exact identifier criterion.
    pub fn is_exact(&self) -> bool {
        self.criteria
            .iter()
            .any(|c| c.kind == CriterionKind::ExactId && c.matched)
    }
}

/// Aggregate statistics for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_entries: usize,
    pub exact_matches: usize,
    pub fuzzy_matches: usize,
    pub unmatched_entries: usize,
    pub requires_manual_review: usize,
    /// Mean confidence over auto-accepted matches only.
    pub average_confidence: f64,
    /// Wall-clock time; the only non-deterministic field of a batch result.
    pub processing_time_ms: u64,
}

/// Every input entry lands in exactly one of the three buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchMatchResult {
    /// Confidence at or above the auto-accept threshold. Safe to auto-apply.
    pub matches: Vec<MatchResult>,
    /// Confidence within `[manual_review_threshold, confidence_threshold)`.
    pub requires_review: Vec<MatchResult>,
    pub unmatched: Vec<ScorecardEntry>,
    pub summary: BatchSummary,
}

impl BatchMatchResult {
    /// Number of entries across all buckets.
    pub fn total(&self) -> usize {
        self.matches.len() + self.requires_review.len() + self.unmatched.len()
    }

    /// Whether the bucket sizes add up to the summary's entry count.
    pub fn entry_count_consistent(&self) -> bool {
        self.total() == self.summary.total_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_recording(call_date: Option<NaiveDate>) -> RecordingCandidate {
        RecordingCandidate {
            id: "rec-1".to_string(),
            title: "Discovery call".to_string(),
            user_id: "user-1".to_string(),
            call_date,
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap(),
            duration_seconds: None,
            transcript: None,
            metadata: serde_json::Map::new(),
        }
    }

    #[test]
    fn test_effective_date_prefers_call_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let recording = make_recording(Some(date));
        assert_eq!(recording.effective_date(), date);
    }

    #[test]
    fn test_effective_date_falls_back_to_created_at() {
        let recording = make_recording(None);
        assert_eq!(
            recording.effective_date(),
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
        );
    }

    #[test]
    fn test_criterion_kind_serialization() {
        let json = serde_json::to_string(&CriterionKind::DurationSimilarity).unwrap();
        assert_eq!(json, "\"duration_similarity\"");
        assert_eq!(CriterionKind::FuzzyTitle.to_string(), "fuzzy_title");
    }

    #[test]
    fn test_criterion_serializes_kind_as_type() {
        let criterion = MatchCriterion::from_outcome(
            CriterionKind::ExactId,
            CriterionOutcome::matched(1.0, "token call_042"),
            1.0,
        );
        let json = serde_json::to_value(&criterion).unwrap();
        assert_eq!(json["type"], "exact_id");
        assert_eq!(json["matched"], true);
    }

    #[test]
    fn test_outcome_clamps_confidence() {
        assert_eq!(CriterionOutcome::matched(1.7, "").confidence, 1.0);
        assert_eq!(CriterionOutcome::unmatched(-0.2, "").confidence, 0.0);
    }

    #[test]
    fn test_entry_deserializes_with_defaults() {
        let entry: ScorecardEntry =
            serde_json::from_str(r#"{"call_identifier": "CALL_042"}"#).unwrap();
        assert_eq!(entry, ScorecardEntry::new("CALL_042"));
    }

    #[test]
    fn test_no_match_result() {
        let result = MatchResult::no_match(ScorecardEntry::new("x"), "nothing");
        assert!(result.matched_recording.is_none());
        assert_eq!(result.confidence, 0.0);
        assert!(!result.is_exact());
    }

    #[test]
    fn test_batch_total_and_consistency() {
        let mut batch = BatchMatchResult::default();
        batch.unmatched.push(ScorecardEntry::new("a"));
        batch.summary.total_entries = 1;
        assert_eq!(batch.total(), 1);
        assert!(batch.entry_count_consistent());

        batch.summary.total_entries = 2;
        assert!(!batch.entry_count_consistent());
    }
}
