//! Prometheus metrics for batch matching.
//!
//! Metrics are observability only and never feed back into matching. Callers
//! own the `Registry`; register everything from [`all_metrics`] into it.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Entry Outcomes
// =============================================================================

/// Entries processed total by bucket.
pub static ENTRIES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("callmatch_entries_total", "Total scorecard entries processed"),
        &["outcome"], // "matched", "review", "unmatched"
    )
    .unwrap()
});

/// Entries routed to unmatched because evaluation failed.
pub static ENTRY_ERRORS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "callmatch_entry_errors_total",
        "Total entries that failed to evaluate",
    )
    .unwrap()
});

/// Candidates skipped because a criterion failed.
pub static CANDIDATE_ERRORS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "callmatch_candidate_errors_total",
        "Total candidates skipped due to criterion errors",
    )
    .unwrap()
});

/// Entries resolved by the exact identifier lookup.
pub static EXACT_ID_SHORT_CIRCUITS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "callmatch_exact_id_short_circuits_total",
        "Total entries resolved by exact identifier lookup",
    )
    .unwrap()
});

// =============================================================================
// Scores and Timing
// =============================================================================

/// Best match confidence scores.
pub static MATCH_CONFIDENCE: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "callmatch_match_confidence",
            "Distribution of best match confidence scores",
        )
        .buckets(vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 0.95, 1.0]),
    )
    .unwrap()
});

/// Batch duration in seconds.
pub static BATCH_DURATION: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "callmatch_batch_duration_seconds",
            "Duration of a batch matching run",
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 30.0]),
    )
    .unwrap()
});

/// All matching metrics, for registration into a caller-owned registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ENTRIES_TOTAL.clone()),
        Box::new(ENTRY_ERRORS.clone()),
        Box::new(CANDIDATE_ERRORS.clone()),
        Box::new(EXACT_ID_SHORT_CIRCUITS.clone()),
        Box::new(MATCH_CONFIDENCE.clone()),
        Box::new(BATCH_DURATION.clone()),
    ]
}
