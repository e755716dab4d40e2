//! Matching configuration types.

use serde::{Deserialize, Serialize};

use crate::matching::traits::MatchError;
use crate::matching::types::CriterionKind;

/// Per-criterion weights used by the confidence scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionWeights {
    #[serde(default = "default_exact_id_weight")]
    pub exact_id: f64,
    #[serde(default = "default_fuzzy_title_weight")]
    pub fuzzy_title: f64,
    #[serde(default = "default_date_proximity_weight")]
    pub date_proximity: f64,
    #[serde(default = "default_duration_similarity_weight")]
    pub duration_similarity: f64,
    /// Accepted for compatibility with stored configurations.
    /// No criterion currently consumes it.
    #[serde(default = "default_user_context_weight")]
    pub user_context: f64,
    #[serde(default = "default_content_similarity_weight")]
    pub content_similarity: f64,
}

fn default_exact_id_weight() -> f64 {
    1.0
}

fn default_fuzzy_title_weight() -> f64 {
    0.8
}

fn default_date_proximity_weight() -> f64 {
    0.6
}

fn default_duration_similarity_weight() -> f64 {
    0.4
}

fn default_user_context_weight() -> f64 {
    0.3
}

fn default_content_similarity_weight() -> f64 {
    0.7
}

impl Default for CriterionWeights {
    fn default() -> Self {
        Self {
            exact_id: default_exact_id_weight(),
            fuzzy_title: default_fuzzy_title_weight(),
            date_proximity: default_date_proximity_weight(),
            duration_similarity: default_duration_similarity_weight(),
            user_context: default_user_context_weight(),
            content_similarity: default_content_similarity_weight(),
        }
    }
}

impl CriterionWeights {
    /// Weight applied to the given criterion.
    pub fn weight_for(&self, kind: CriterionKind) -> f64 {
        match kind {
            CriterionKind::ExactId => self.exact_id,
            CriterionKind::FuzzyTitle => self.fuzzy_title,
            CriterionKind::DateProximity => self.date_proximity,
            CriterionKind::DurationSimilarity => self.duration_similarity,
            CriterionKind::ContentSimilarity => self.content_similarity,
        }
    }

    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("exact_id", self.exact_id),
            ("fuzzy_title", self.fuzzy_title),
            ("date_proximity", self.date_proximity),
            ("duration_similarity", self.duration_similarity),
            ("user_context", self.user_context),
            ("content_similarity", self.content_similarity),
        ]
    }
}

/// Matching configuration.
///
/// Every field has a default, so partial documents merge over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Auto-accept floor (0.0-1.0).
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,
    /// Below this an entry is unmatched outright (0.0-1.0).
    /// Must not exceed `confidence_threshold`.
    #[serde(default = "default_manual_review_threshold")]
    pub manual_review_threshold: f64,
    /// String-similarity floor for the fuzzy title criterion (0.0-1.0).
    #[serde(default = "default_fuzzy_match_threshold")]
    pub fuzzy_match_threshold: f64,
    #[serde(default = "default_date_tolerance_days")]
    pub date_tolerance_days: u32,
    /// Relative duration tolerance, `0.2` meaning 20%.
    #[serde(default = "default_duration_tolerance_percent")]
    pub duration_tolerance_percent: f64,
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
    #[serde(default)]
    pub weights: CriterionWeights,
    #[serde(default = "default_true")]
    pub enable_content_matching: bool,
    /// Restrict candidates to the caller's user when a user id is given.
    #[serde(default)]
    pub strict_user_matching: bool,
}

fn default_confidence_threshold() -> f64 {
    0.8
}

fn default_manual_review_threshold() -> f64 {
    0.6
}

fn default_fuzzy_match_threshold() -> f64 {
    0.7
}

fn default_date_tolerance_days() -> u32 {
    3
}

fn default_duration_tolerance_percent() -> f64 {
    0.2
}

fn default_max_alternatives() -> usize {
    3
}

fn default_true() -> bool {
    true
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            manual_review_threshold: default_manual_review_threshold(),
            fuzzy_match_threshold: default_fuzzy_match_threshold(),
            date_tolerance_days: default_date_tolerance_days(),
            duration_tolerance_percent: default_duration_tolerance_percent(),
            max_alternatives: default_max_alternatives(),
            weights: CriterionWeights::default(),
            enable_content_matching: true,
            strict_user_matching: false,
        }
    }
}

impl MatchingConfig {
    /// Validate the configuration.
    ///
    /// An invalid config would skew every result in a batch, so callers run
    /// this before touching any entry.
    pub fn validate(&self) -> Result<(), MatchError> {
        for (name, value) in [
            ("confidence_threshold", self.confidence_threshold),
            ("manual_review_threshold", self.manual_review_threshold),
            ("fuzzy_match_threshold", self.fuzzy_match_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MatchError::InvalidConfig(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }

        if self.manual_review_threshold > self.confidence_threshold {
            return Err(MatchError::InvalidConfig(format!(
                "manual_review_threshold ({}) cannot exceed confidence_threshold ({})",
                self.manual_review_threshold, self.confidence_threshold
            )));
        }

        if !self.duration_tolerance_percent.is_finite() || self.duration_tolerance_percent < 0.0 {
            return Err(MatchError::InvalidConfig(format!(
                "duration_tolerance_percent must be a non-negative number, got {}",
                self.duration_tolerance_percent
            )));
        }

        for (name, weight) in self.weights.named() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(MatchError::InvalidConfig(format!(
                    "weights.{} must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }

        Ok(())
    }
}
