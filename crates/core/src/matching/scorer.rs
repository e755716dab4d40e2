//! Combination of evaluated criteria into one confidence value.

use crate::matching::types::MatchCriterion;

/// Weighted average over matched criteria only, clamped to `[0, 1]`.
///
/// Unmatched criteria never dilute the score, so a candidate hitting a few
/// strong signals outranks one hitting many weak ones. Returns `0.0` when no
/// criterion matched or the matched weights sum to zero.
pub fn combine(criteria: &[MatchCriterion]) -> f64 {
    let (weighted, total_weight) = criteria
        .iter()
        .filter(|c| c.matched)
        .fold((0.0, 0.0), |(weighted, total), c| {
            (weighted + c.confidence * c.weight, total + c.weight)
        });

    if total_weight <= 0.0 {
        return 0.0;
    }

    (weighted / total_weight).clamp(0.0, 1.0)
}
