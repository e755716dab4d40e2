//! Traits for matching components.

use thiserror::Error;

use crate::matching::config::MatchingConfig;
use crate::matching::types::{CriterionKind, CriterionOutcome, RecordingCandidate, ScorecardEntry};

/// Errors that can occur during matching.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid matching configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid scorecard entry: {0}")]
    InvalidEntry(String),

    #[error("Invalid recording {id}: {reason}")]
    InvalidRecording { id: String, reason: String },

    #[error("Criterion {criterion} failed: {reason}")]
    CriterionFailed {
        criterion: CriterionKind,
        reason: String,
    },
}

/// A single, independent match signal.
///
/// Implementations are pure: the same entry, recording and config always
/// produce the same outcome. An `Err` disqualifies only the candidate being
/// evaluated, never the whole entry.
pub trait CriterionEvaluator: Send + Sync {
    /// Which criterion this evaluator produces.
    fn kind(&self) -> CriterionKind;

    /// Name of this evaluator for logging/audit.
    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// Evaluate one entry/recording pair.
    fn evaluate(
        &self,
        entry: &ScorecardEntry,
        recording: &RecordingCandidate,
        config: &MatchingConfig,
    ) -> Result<CriterionOutcome, MatchError>;
}
