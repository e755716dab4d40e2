//! Scorecard matching - reconciling imported scorecard rows with recordings.
//!
//! Given a batch of scorecard entries (each referencing a call by a loose
//! identifier, date and duration) and a pool of candidate recordings, decide
//! per entry which recording it refers to, if any.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        BatchMatcher                          │
//! │   validate config -> build RecordingIndex -> per entry:      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │                    MatchSelector                       │  │
//! │  │  1. RecordingIndex::find_exact_id  (short-circuit)     │  │
//! │  │  2. CriterionEvaluator x5 per candidate                │  │
//! │  │     exact_id | fuzzy_title | date_proximity |          │  │
//! │  │     duration_similarity | content_similarity           │  │
//! │  │  3. scorer::combine -> prune -> rank -> alternatives   │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! │                                                              │
//! │   bucket: matches | requires_review | unmatched + summary    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Buckets
//!
//! - **matches**: confidence >= `confidence_threshold`. Safe to auto-apply.
//! - **requires_review**: `manual_review_threshold <= confidence < confidence_threshold`.
//! - **unmatched**: everything else, including entries that failed to evaluate.
//!
//! # Example
//!
//! ```ignore
//! use callmatch_core::matching::{BatchMatcher, MatchingConfig};
//!
//! let matcher = BatchMatcher::new(MatchingConfig::default())?;
//! let result = matcher.match_all(&entries, &recordings, Some("user-1"));
//! for m in &result.matches {
//!     // apply m.matched_recording
//! }
//! ```

mod batch;
mod config;
mod criteria;
mod index;
mod scorer;
mod selector;
mod traits;
mod types;

// Configuration types
pub use config::{CriterionWeights, MatchingConfig};

// Core traits
pub use traits::{CriterionEvaluator, MatchError};

// Criterion implementations
pub use criteria::{
    default_evaluators, extract_keywords, ContentSimilarityCriterion, DateProximityCriterion,
    DurationSimilarityCriterion, ExactIdCriterion, FuzzyTitleCriterion, CONTENT_MATCH_FRACTION,
    MAX_CONTENT_KEYWORDS,
};

// Index, scoring and selection
pub use index::RecordingIndex;
pub use scorer::combine;
pub use selector::{MatchSelector, EXACT_MATCH_REASON, MIN_CANDIDATE_CONFIDENCE};

// Batch orchestration
pub use batch::{match_all, BatchMatcher};

// Data model
pub use types::{
    AlternativeMatch, BatchMatchResult, BatchSummary, CriterionKind, CriterionOutcome,
    MatchCriterion, MatchResult, RecordingCandidate, ScorecardEntry,
};
