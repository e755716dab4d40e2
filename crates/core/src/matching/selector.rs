//! Best match selection for a single scorecard entry.

use tracing::debug;

use crate::matching::config::MatchingConfig;
use crate::matching::criteria::default_evaluators;
use crate::matching::index::RecordingIndex;
use crate::matching::scorer::combine;
use crate::matching::traits::{CriterionEvaluator, MatchError};
use crate::matching::types::{
    AlternativeMatch, CriterionKind, MatchCriterion, MatchResult, RecordingCandidate,
    ScorecardEntry,
};
use crate::metrics;

/// Candidates at or below this confidence are pruned before ranking.
pub const MIN_CANDIDATE_CONFIDENCE: f64 = 0.1;

/// Slack absorbed when comparing combined scores against the prune floor.
const SCORE_EPSILON: f64 = 1e-9;

/// Reason reported for exact identifier hits.
pub const EXACT_MATCH_REASON: &str = "Exact ID match found";

/// A candidate that survived evaluation.
#[derive(Debug, Clone)]
struct ScoredRecording<'a> {
    recording: &'a RecordingCandidate,
    confidence: f64,
    criteria: Vec<MatchCriterion>,
}

/// Finds the best recording (and runner-ups) for one entry.
pub struct MatchSelector {
    evaluators: Vec<Box<dyn CriterionEvaluator>>,
}

impl MatchSelector {
    /// Create a selector with the five standard criteria.
    pub fn new() -> Self {
        Self {
            evaluators: default_evaluators(),
        }
    }

    /// Create a selector with a custom evaluator set.
    pub fn with_evaluators(evaluators: Vec<Box<dyn CriterionEvaluator>>) -> Self {
        Self { evaluators }
    }

    /// Names of the configured evaluators, in evaluation order.
    pub fn evaluator_names(&self) -> Vec<&str> {
        self.evaluators.iter().map(|e| e.name()).collect()
    }

    /// Find the best match for `entry` among `recordings`.
    ///
    /// An exact identifier hit in `index` short-circuits every other
    /// criterion. Otherwise all candidates are scored and ranked; a candidate
    /// whose evaluation fails is skipped rather than failing the entry.
    pub fn find_best_match(
        &self,
        entry: &ScorecardEntry,
        recordings: &[RecordingCandidate],
        index: &RecordingIndex<'_>,
        config: &MatchingConfig,
    ) -> Result<MatchResult, MatchError> {
        if entry.call_identifier.trim().is_empty() {
            return Err(MatchError::InvalidEntry(
                "call_identifier must not be empty".to_string(),
            ));
        }
        if let Some(minutes) = entry.duration_minutes {
            if !minutes.is_finite() || minutes < 0.0 {
                return Err(MatchError::InvalidEntry(format!(
                    "duration_minutes must be a non-negative number, got {}",
                    minutes
                )));
            }
        }

        if let Some(recording) = index.find_exact_id(&entry.call_identifier) {
            debug!(
                call_identifier = %entry.call_identifier,
                recording_id = %recording.id,
                "Exact ID short-circuit"
            );
            metrics::EXACT_ID_SHORT_CIRCUITS.inc();
            return Ok(Self::exact_result(entry, recording, config));
        }

        let mut scored: Vec<ScoredRecording<'_>> = recordings
            .iter()
            .filter_map(|recording| match self.score_candidate(entry, recording, config) {
                Ok(scored) => Some(scored),
                Err(e) => {
                    debug!(
                        call_identifier = %entry.call_identifier,
                        recording_id = %recording.id,
                        error = %e,
                        "Skipping candidate"
                    );
                    metrics::CANDIDATE_ERRORS.inc();
                    None
                }
            })
            .filter(|s| s.confidence > MIN_CANDIDATE_CONFIDENCE + SCORE_EPSILON)
            .collect();

        // Stable: ties keep input order, so the first-seen candidate wins.
        scored.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let mut ranked = scored.into_iter();
        let Some(best) = ranked.next() else {
            return Ok(MatchResult::no_match(
                entry.clone(),
                "No candidate above minimum confidence",
            ));
        };

        let alternatives: Vec<AlternativeMatch> = ranked
            .take(config.max_alternatives)
            .map(|s| AlternativeMatch {
                recording: s.recording.clone(),
                confidence: s.confidence,
                reason: strongest_reason(&s.criteria).to_string(),
                criteria: s.criteria,
            })
            .collect();

        let confidence = best.confidence;
        let requires_manual_review = confidence >= config.manual_review_threshold
            && confidence < config.confidence_threshold;
        let below_review = confidence < config.manual_review_threshold;

        let match_reason = if below_review {
            format!(
                "Best candidate {:.2} below review threshold {:.2}",
                confidence, config.manual_review_threshold
            )
        } else {
            match_reason(&best.criteria)
        };

        Ok(MatchResult {
            entry: entry.clone(),
            matched_recording: (!below_review).then(|| best.recording.clone()),
            confidence,
            criteria: best.criteria,
            alternatives,
            requires_manual_review,
            match_reason,
        })
    }

    /// Evaluate every criterion for one candidate and combine the results.
    fn score_candidate<'a>(
        &self,
        entry: &ScorecardEntry,
        recording: &'a RecordingCandidate,
        config: &MatchingConfig,
    ) -> Result<ScoredRecording<'a>, MatchError> {
        let criteria = self
            .evaluators
            .iter()
            .map(|evaluator| {
                let kind = evaluator.kind();
                evaluator
                    .evaluate(entry, recording, config)
                    .map(|outcome| {
                        MatchCriterion::from_outcome(kind, outcome, config.weights.weight_for(kind))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScoredRecording {
            recording,
            confidence: combine(&criteria),
            criteria,
        })
    }

    fn exact_result(
        entry: &ScorecardEntry,
        recording: &RecordingCandidate,
        config: &MatchingConfig,
    ) -> MatchResult {
        MatchResult {
            entry: entry.clone(),
            matched_recording: Some(recording.clone()),
            confidence: 1.0,
            criteria: vec![MatchCriterion {
                kind: CriterionKind::ExactId,
                matched: true,
                confidence: 1.0,
                weight: config.weights.exact_id,
                details: format!(
                    "identifier '{}' found in title '{}'",
                    entry.call_identifier, recording.title
                ),
            }],
            alternatives: Vec::new(),
            requires_manual_review: false,
            match_reason: EXACT_MATCH_REASON.to_string(),
        }
    }
}

impl Default for MatchSelector {
    fn default() -> Self {
        Self::new()
    }
}

/// Label of the highest-confidence matched criterion.
///
/// Ties go to the criterion evaluated first.
fn strongest_reason(criteria: &[MatchCriterion]) -> &'static str {
    let mut strongest: Option<&MatchCriterion> = None;
    for c in criteria.iter().filter(|c| c.matched) {
        if strongest.map_or(true, |s| c.confidence > s.confidence) {
            strongest = Some(c);
        }
    }
    strongest.map_or("Low confidence match", |c| c.kind.label())
}

/// Labels of all matched criteria, strongest first.
fn match_reason(criteria: &[MatchCriterion]) -> String {
    let mut matched: Vec<&MatchCriterion> = criteria.iter().filter(|c| c.matched).collect();
    matched.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    if matched.is_empty() {
        return "Low confidence match".to_string();
    }
    matched
        .iter()
        .map(|c| c.kind.label())
        .collect::<Vec<_>>()
        .join(", ")
}
