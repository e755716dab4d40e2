//! Batch orchestration: index once, match every entry, bucket the results.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::BatchConfig;
use crate::matching::config::MatchingConfig;
use crate::matching::index::RecordingIndex;
use crate::matching::selector::MatchSelector;
use crate::matching::traits::MatchError;
use crate::matching::types::{
    BatchMatchResult, BatchSummary, MatchResult, RecordingCandidate, ScorecardEntry,
};
use crate::metrics;

/// Runs a whole scorecard batch against a pool of recordings.
///
/// The config is validated on construction, so a `BatchMatcher` can never run
/// with thresholds that would skew every result.
pub struct BatchMatcher {
    config: MatchingConfig,
    batch: BatchConfig,
    selector: MatchSelector,
}

impl BatchMatcher {
    /// Create a matcher, failing fast on an invalid config.
    pub fn new(config: MatchingConfig) -> Result<Self, MatchError> {
        config.validate()?;
        Ok(Self {
            config,
            batch: BatchConfig::default(),
            selector: MatchSelector::new(),
        })
    }

    /// Set batch execution options.
    pub fn with_batch_config(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Replace the match selector.
    pub fn with_selector(mut self, selector: MatchSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Get the matching configuration.
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Match every entry and bucket the results.
    ///
    /// Per-entry failures are logged and routed to `unmatched`; the batch
    /// always returns a bucket for every input entry.
    pub fn match_all(
        &self,
        entries: &[ScorecardEntry],
        recordings: &[RecordingCandidate],
        user_id: Option<&str>,
    ) -> BatchMatchResult {
        let start = Instant::now();

        let scoped: Vec<RecordingCandidate>;
        let pool: &[RecordingCandidate] = match user_id {
            Some(user) if self.config.strict_user_matching => {
                scoped = recordings
                    .iter()
                    .filter(|r| r.user_id == user)
                    .cloned()
                    .collect();
                &scoped
            }
            _ => recordings,
        };

        let index = RecordingIndex::build(pool);

        let run = |entry: &ScorecardEntry| -> Option<MatchResult> {
            match self
                .selector
                .find_best_match(entry, pool, &index, &self.config)
            {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(
                        call_identifier = %entry.call_identifier,
                        error = %e,
                        "Entry could not be matched, routing to unmatched"
                    );
                    metrics::ENTRY_ERRORS.inc();
                    None
                }
            }
        };

        let parallel = self.batch.parallel && entries.len() >= self.batch.min_parallel_entries;
        let outcomes: Vec<Option<MatchResult>> = if parallel {
            entries.par_iter().map(run).collect()
        } else {
            entries.iter().map(run).collect()
        };

        let mut result = BatchMatchResult::default();
        for (entry, outcome) in entries.iter().zip(outcomes) {
            match outcome {
                Some(r)
                    if r.matched_recording.is_some()
                        && r.confidence >= self.config.confidence_threshold =>
                {
                    metrics::MATCH_CONFIDENCE.observe(r.confidence);
                    result.matches.push(r);
                }
                Some(r)
                    if r.matched_recording.is_some()
                        && r.confidence >= self.config.manual_review_threshold =>
                {
                    metrics::MATCH_CONFIDENCE.observe(r.confidence);
                    result.requires_review.push(r);
                }
                Some(r) => {
                    if r.confidence > 0.0 {
                        metrics::MATCH_CONFIDENCE.observe(r.confidence);
                    }
                    result.unmatched.push(entry.clone());
                }
                None => result.unmatched.push(entry.clone()),
            }
        }

        let elapsed = start.elapsed();
        result.summary = summarize(&result, entries.len(), elapsed.as_millis() as u64);

        metrics::ENTRIES_TOTAL
            .with_label_values(&["matched"])
            .inc_by(result.matches.len() as u64);
        metrics::ENTRIES_TOTAL
            .with_label_values(&["review"])
            .inc_by(result.requires_review.len() as u64);
        metrics::ENTRIES_TOTAL
            .with_label_values(&["unmatched"])
            .inc_by(result.unmatched.len() as u64);
        metrics::BATCH_DURATION.observe(elapsed.as_secs_f64());

        info!(
            total = result.summary.total_entries,
            exact = result.summary.exact_matches,
            fuzzy = result.summary.fuzzy_matches,
            review = result.summary.requires_manual_review,
            unmatched = result.summary.unmatched_entries,
            candidates = pool.len(),
            parallel,
            elapsed_ms = result.summary.processing_time_ms,
            "Batch matching complete"
        );

        result
    }
}

/// Validate `config` and match a batch in one call.
///
/// Convenience wrapper over [`BatchMatcher`] with default batch options.
pub fn match_all(
    entries: &[ScorecardEntry],
    recordings: &[RecordingCandidate],
    user_id: Option<&str>,
    config: MatchingConfig,
) -> Result<BatchMatchResult, MatchError> {
    Ok(BatchMatcher::new(config)?.match_all(entries, recordings, user_id))
}

fn summarize(
    result: &BatchMatchResult,
    total_entries: usize,
    processing_time_ms: u64,
) -> BatchSummary {
    let exact_matches = result.matches.iter().filter(|m| m.is_exact()).count();
    let average_confidence = if result.matches.is_empty() {
        0.0
    } else {
        result.matches.iter().map(|m| m.confidence).sum::<f64>() / result.matches.len() as f64
    };

    BatchSummary {
        total_entries,
        exact_matches,
        fuzzy_matches: result.matches.len() - exact_matches,
        unmatched_entries: result.unmatched.len(),
        requires_manual_review: result.requires_review.len(),
        average_confidence,
        processing_time_ms,
    }
}
