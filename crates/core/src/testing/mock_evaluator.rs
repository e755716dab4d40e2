//! Mock criterion evaluator for testing.

use crate::matching::{
    CriterionEvaluator, CriterionKind, CriterionOutcome, MatchError, MatchingConfig,
    RecordingCandidate, ScorecardEntry,
};

/// Evaluator returning a fixed outcome for every candidate.
///
/// Provides controllable behavior for testing:
/// - Return a fixed matched/unmatched confidence
/// - Fail for selected recording ids to exercise candidate skipping
#[derive(Debug, Clone)]
pub struct MockEvaluator {
    kind: CriterionKind,
    matched: bool,
    confidence: f64,
    failing_ids: Vec<String>,
}

impl MockEvaluator {
    /// Always match with the given confidence.
    pub fn scoring(kind: CriterionKind, confidence: f64) -> Self {
        Self {
            kind,
            matched: true,
            confidence,
            failing_ids: Vec::new(),
        }
    }

    /// Never match.
    pub fn never(kind: CriterionKind) -> Self {
        Self {
            kind,
            matched: false,
            confidence: 0.0,
            failing_ids: Vec::new(),
        }
    }

    /// Fail evaluation for the recording with this id.
    pub fn failing_for(mut self, recording_id: &str) -> Self {
        self.failing_ids.push(recording_id.to_string());
        self
    }
}

impl CriterionEvaluator for MockEvaluator {
    fn kind(&self) -> CriterionKind {
        self.kind
    }

    fn evaluate(
        &self,
        _entry: &ScorecardEntry,
        recording: &RecordingCandidate,
        _config: &MatchingConfig,
    ) -> Result<CriterionOutcome, MatchError> {
        if self.failing_ids.contains(&recording.id) {
            return Err(MatchError::CriterionFailed {
                criterion: self.kind,
                reason: format!("injected failure for {}", recording.id),
            });
        }

        Ok(if self.matched {
            CriterionOutcome::matched(self.confidence, "mock")
        } else {
            CriterionOutcome::unmatched(self.confidence, "mock")
        })
    }
}
