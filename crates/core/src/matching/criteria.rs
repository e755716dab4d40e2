//! The five match criterion evaluators.
//!
//! Each evaluator judges one signal in isolation. Weighting and combination
//! happen in [`crate::matching::scorer`].

use crate::identifiers::{extract_tokens, normalize};
use crate::matching::config::MatchingConfig;
use crate::matching::traits::{CriterionEvaluator, MatchError};
use crate::matching::types::{CriterionKind, CriterionOutcome, RecordingCandidate, ScorecardEntry};
use crate::similarity::similarity;

/// Maximum number of note keywords checked against a transcript.
pub const MAX_CONTENT_KEYWORDS: usize = 10;

/// Keyword overlap fraction that must be exceeded for a content match.
pub const CONTENT_MATCH_FRACTION: f64 = 0.3;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "any", "can", "had", "her", "was",
    "one", "our", "out", "has", "him", "his", "how", "its", "may", "new", "now", "see", "who",
    "did", "get", "got", "let", "say", "she", "too", "use", "this", "that", "with", "have",
    "from", "they", "will", "would", "there", "their", "what", "about", "which", "when", "were",
    "been", "into", "than", "then", "them", "these", "some", "could", "should", "also", "very",
    "just", "more", "your",
];

/// The default evaluator set, in evaluation order.
pub fn default_evaluators() -> Vec<Box<dyn CriterionEvaluator>> {
    vec![
        Box::new(ExactIdCriterion),
        Box::new(FuzzyTitleCriterion),
        Box::new(DateProximityCriterion),
        Box::new(DurationSimilarityCriterion),
        Box::new(ContentSimilarityCriterion),
    ]
}

/// Identifier tokens in the recording title equal the entry identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactIdCriterion;

impl CriterionEvaluator for ExactIdCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::ExactId
    }

    fn evaluate(
        &self,
        entry: &ScorecardEntry,
        recording: &RecordingCandidate,
        _config: &MatchingConfig,
    ) -> Result<CriterionOutcome, MatchError> {
        let wanted = normalize(&entry.call_identifier);
        if wanted.is_empty() {
            return Ok(CriterionOutcome::unmatched(0.0, "identifier has no alphanumerics"));
        }

        let hit = extract_tokens(&recording.title)
            .into_iter()
            .find(|token| normalize(token) == wanted);

        Ok(match hit {
            Some(token) => CriterionOutcome::matched(1.0, format!("title token '{}'", token)),
            None => CriterionOutcome::unmatched(0.0, "no identifier token in title"),
        })
    }
}

/// Edit-distance similarity between the identifier and the recording title.
#[derive(Debug, Clone, Copy, Default)]
pub struct FuzzyTitleCriterion;

impl CriterionEvaluator for FuzzyTitleCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::FuzzyTitle
    }

    fn evaluate(
        &self,
        entry: &ScorecardEntry,
        recording: &RecordingCandidate,
        config: &MatchingConfig,
    ) -> Result<CriterionOutcome, MatchError> {
        let score = similarity(&entry.call_identifier, &recording.title);
        let details = format!("title similarity {:.2}", score);

        Ok(if score >= config.fuzzy_match_threshold {
            CriterionOutcome::matched(score, details)
        } else {
            CriterionOutcome::unmatched(score, details)
        })
    }
}

/// Linear decay from 1.0 at zero difference to 0.0 at the tolerance boundary.
///
/// A zero tolerance only accepts an exact match.
fn linear_decay(diff: f64, tolerance: f64) -> Option<f64> {
    if tolerance <= 0.0 {
        return (diff == 0.0).then_some(1.0);
    }
    (diff <= tolerance).then(|| (1.0 - diff / tolerance).max(0.0))
}

/// Call date of the entry against the recording's effective date.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateProximityCriterion;

impl CriterionEvaluator for DateProximityCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::DateProximity
    }

    fn evaluate(
        &self,
        entry: &ScorecardEntry,
        recording: &RecordingCandidate,
        config: &MatchingConfig,
    ) -> Result<CriterionOutcome, MatchError> {
        let Some(entry_date) = entry.call_date else {
            return Ok(CriterionOutcome::unmatched(0.0, "entry has no call date"));
        };

        let diff_days = entry_date
            .signed_duration_since(recording.effective_date())
            .num_days()
            .unsigned_abs();
        let details = format!("{} day(s) apart", diff_days);

        Ok(
            match linear_decay(diff_days as f64, f64::from(config.date_tolerance_days)) {
                Some(confidence) => CriterionOutcome::matched(confidence, details),
                None => CriterionOutcome::unmatched(0.0, details),
            },
        )
    }
}

/// Relative difference between the entry and recording durations.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationSimilarityCriterion;

impl CriterionEvaluator for DurationSimilarityCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::DurationSimilarity
    }

    fn evaluate(
        &self,
        entry: &ScorecardEntry,
        recording: &RecordingCandidate,
        config: &MatchingConfig,
    ) -> Result<CriterionOutcome, MatchError> {
        let (Some(call_minutes), Some(recording_seconds)) =
            (entry.duration_minutes, recording.duration_seconds)
        else {
            return Ok(CriterionOutcome::unmatched(0.0, "duration missing"));
        };

        if !call_minutes.is_finite() || call_minutes < 0.0 {
            return Err(MatchError::InvalidEntry(format!(
                "duration_minutes must be a non-negative number, got {}",
                call_minutes
            )));
        }
        if !recording_seconds.is_finite() || recording_seconds < 0.0 {
            return Err(MatchError::InvalidRecording {
                id: recording.id.clone(),
                reason: format!(
                    "duration_seconds must be a non-negative number, got {}",
                    recording_seconds
                ),
            });
        }

        let recording_minutes = recording_seconds / 60.0;
        let longest = call_minutes.max(recording_minutes);
        let diff_pct = if longest == 0.0 {
            0.0
        } else {
            (call_minutes - recording_minutes).abs() / longest
        };
        let details = format!(
            "{:.1} min vs {:.1} min ({:.0}% apart)",
            call_minutes,
            recording_minutes,
            diff_pct * 100.0
        );

        Ok(
            match linear_decay(diff_pct, config.duration_tolerance_percent) {
                Some(confidence) => CriterionOutcome::matched(confidence, details),
                None => CriterionOutcome::unmatched(0.0, details),
            },
        )
    }
}

/// Extract up to [`MAX_CONTENT_KEYWORDS`] keywords from manager notes.
///
/// Lower-cased, punctuation stripped, tokens of length <= 2 and stop words
/// dropped, duplicates removed in first-seen order.
pub fn extract_keywords(notes: &str) -> Vec<String> {
    let cleaned: String = notes
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    let mut keywords: Vec<String> = Vec::new();
    for word in cleaned.split_whitespace() {
        if keywords.len() == MAX_CONTENT_KEYWORDS {
            break;
        }
        if word.chars().count() <= 2 || STOP_WORDS.contains(&word) {
            continue;
        }
        if !keywords.iter().any(|k| k == word) {
            keywords.push(word.to_string());
        }
    }
    keywords
}

/// Fraction of note keywords appearing in the recording transcript.
///
/// Overlap is measured notes-to-transcript only and is not normalized by
/// transcript length.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentSimilarityCriterion;

impl CriterionEvaluator for ContentSimilarityCriterion {
    fn kind(&self) -> CriterionKind {
        CriterionKind::ContentSimilarity
    }

    fn evaluate(
        &self,
        entry: &ScorecardEntry,
        recording: &RecordingCandidate,
        config: &MatchingConfig,
    ) -> Result<CriterionOutcome, MatchError> {
        if !config.enable_content_matching {
            return Ok(CriterionOutcome::unmatched(0.0, "content matching disabled"));
        }

        let transcript = match recording.transcript.as_deref() {
            Some(t) if !t.trim().is_empty() => t.to_lowercase(),
            _ => return Ok(CriterionOutcome::unmatched(0.0, "no transcript")),
        };
        if entry.manager_notes.trim().is_empty() {
            return Ok(CriterionOutcome::unmatched(0.0, "no manager notes"));
        }

        let keywords = extract_keywords(&entry.manager_notes);
        if keywords.is_empty() {
            return Ok(CriterionOutcome::unmatched(0.0, "no keywords in notes"));
        }

        let found = keywords
            .iter()
            .filter(|kw| transcript.contains(kw.as_str()))
            .count();
        let fraction = found as f64 / keywords.len() as f64;
        let details = format!("{}/{} note keywords in transcript", found, keywords.len());

        Ok(if fraction > CONTENT_MATCH_FRACTION {
            CriterionOutcome::matched(fraction, details)
        } else {
            CriterionOutcome::unmatched(fraction, details)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::{entry, recording};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_id_hit() {
        let outcome = ExactIdCriterion
            .evaluate(
                &entry("call_042"),
                &recording("r1", "Sales Call CALL_042 Demo"),
                &MatchingConfig::default(),
            )
            .unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.confidence, 1.0);
    }

    #[test]
    fn test_exact_id_ignores_separators() {
        let outcome = ExactIdCriterion
            .evaluate(
                &entry("CALL-042"),
                &recording("r1", "Sales Call CALL_042 Demo"),
                &MatchingConfig::default(),
            )
            .unwrap();
        assert!(outcome.matched);
    }

    #[test]
    fn test_exact_id_miss() {
        let outcome = ExactIdCriterion
            .evaluate(
                &entry("CALL_043"),
                &recording("r1", "Sales Call CALL_042 Demo"),
                &MatchingConfig::default(),
            )
            .unwrap();
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 0.0);
    }

    #[test]
    fn test_fuzzy_title_threshold() {
        let config = MatchingConfig::default();
        let close = FuzzyTitleCriterion
            .evaluate(&entry("Weekly Sync 5"), &recording("r1", "Weekly Sync #5"), &config)
            .unwrap();
        assert!(close.matched);
        assert!(close.confidence > 0.9);

        let far = FuzzyTitleCriterion
            .evaluate(&entry("Weekly Sync 5"), &recording("r2", "Quarterly board review"), &config)
            .unwrap();
        assert!(!far.matched);
        assert!(far.confidence < 0.7);
    }

    #[test]
    fn test_date_proximity_decay() {
        let config = MatchingConfig::default();
        let mut e = entry("x");
        e.call_date = Some(date(2024, 2, 1));

        let mut r = recording("r1", "t");
        r.call_date = Some(date(2024, 2, 2));
        let outcome = DateProximityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(outcome.matched);
        assert!((outcome.confidence - (1.0 - 1.0 / 3.0)).abs() < 1e-9);

        r.call_date = Some(date(2024, 2, 4));
        let boundary = DateProximityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(boundary.matched, "3 days is inside a 3 day tolerance");
        assert_eq!(boundary.confidence, 0.0);

        r.call_date = Some(date(2024, 2, 11));
        let outside = DateProximityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(!outside.matched);
        assert_eq!(outside.confidence, 0.0);
    }

    #[test]
    fn test_date_proximity_uses_created_at_fallback() {
        let mut e = entry("x");
        e.call_date = Some(date(2024, 1, 10));
        let r = recording("r1", "t"); // created 2024-01-10 by fixture
        assert_eq!(r.call_date, None);

        let outcome = DateProximityCriterion
            .evaluate(&e, &r, &MatchingConfig::default())
            .unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.confidence, 1.0);
    }

    #[test]
    fn test_date_proximity_missing_entry_date() {
        let outcome = DateProximityCriterion
            .evaluate(&entry("x"), &recording("r1", "t"), &MatchingConfig::default())
            .unwrap();
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 0.0);
    }

    #[test]
    fn test_date_proximity_zero_tolerance() {
        let config = MatchingConfig {
            date_tolerance_days: 0,
            ..Default::default()
        };
        let mut e = entry("x");
        e.call_date = Some(date(2024, 1, 10));
        let mut r = recording("r1", "t");
        r.call_date = Some(date(2024, 1, 10));
        let same = DateProximityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(same.matched);
        assert_eq!(same.confidence, 1.0);

        r.call_date = Some(date(2024, 1, 11));
        let next = DateProximityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(!next.matched);
    }

    #[test]
    fn test_duration_similarity() {
        let config = MatchingConfig::default();
        let mut e = entry("x");
        e.duration_minutes = Some(30.0);
        let mut r = recording("r1", "t");
        r.duration_seconds = Some(30.0 * 60.0);

        let exact = DurationSimilarityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(exact.matched);
        assert_eq!(exact.confidence, 1.0);

        // 27 vs 30 minutes: 10% apart, half of the 20% tolerance
        r.duration_seconds = Some(27.0 * 60.0);
        let near = DurationSimilarityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(near.matched);
        assert!((near.confidence - 0.5).abs() < 1e-9, "got {}", near.confidence);

        r.duration_seconds = Some(10.0 * 60.0);
        let far = DurationSimilarityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(!far.matched);
        assert_eq!(far.confidence, 0.0);
    }

    #[test]
    fn test_duration_missing_is_unmatched() {
        let mut e = entry("x");
        e.duration_minutes = Some(30.0);
        let outcome = DurationSimilarityCriterion
            .evaluate(&e, &recording("r1", "t"), &MatchingConfig::default())
            .unwrap();
        assert!(!outcome.matched);
    }

    #[test]
    fn test_duration_zero_tolerance() {
        let config = MatchingConfig {
            duration_tolerance_percent: 0.0,
            ..Default::default()
        };
        let mut e = entry("x");
        e.duration_minutes = Some(30.0);
        let mut r = recording("r1", "t");
        r.duration_seconds = Some(30.0 * 60.0);

        let equal = DurationSimilarityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(equal.matched);
        assert_eq!(equal.confidence, 1.0);

        r.duration_seconds = Some(30.0 * 60.0 + 1.0);
        let off_by_a_second = DurationSimilarityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(!off_by_a_second.matched);
        assert_eq!(off_by_a_second.confidence, 0.0);
    }

    #[test]
    fn test_duration_both_zero() {
        let mut e = entry("x");
        e.duration_minutes = Some(0.0);
        let mut r = recording("r1", "t");
        r.duration_seconds = Some(0.0);
        let outcome = DurationSimilarityCriterion
            .evaluate(&e, &r, &MatchingConfig::default())
            .unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.confidence, 1.0);
    }

    #[test]
    fn test_duration_negative_recording_is_error() {
        let mut e = entry("x");
        e.duration_minutes = Some(10.0);
        let mut r = recording("bad", "t");
        r.duration_seconds = Some(-5.0);
        let err = DurationSimilarityCriterion
            .evaluate(&e, &r, &MatchingConfig::default())
            .unwrap_err();
        assert!(matches!(err, MatchError::InvalidRecording { ref id, .. } if id == "bad"));
    }

    #[test]
    fn test_extract_keywords() {
        let keywords = extract_keywords("Rep handled the PRICING objection well, and the demo!");
        assert_eq!(keywords, vec!["rep", "handled", "pricing", "objection", "well", "demo"]);
    }

    #[test]
    fn test_extract_keywords_caps_and_dedups() {
        let notes = "alpha alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo";
        let keywords = extract_keywords(notes);
        assert_eq!(keywords.len(), MAX_CONTENT_KEYWORDS);
        assert_eq!(keywords[0], "alpha");
        assert_eq!(keywords[1], "bravo");
        assert!(!keywords.contains(&"kilo".to_string()));
    }

    #[test]
    fn test_content_similarity_match() {
        let mut e = entry("x");
        e.manager_notes = "Discussed pricing and renewal timeline".to_string();
        let mut r = recording("r1", "t");
        r.transcript = Some("...so the PRICING for renewal would be...".to_string());

        let outcome = ContentSimilarityCriterion
            .evaluate(&e, &r, &MatchingConfig::default())
            .unwrap();
        // discussed, pricing, renewal, timeline -> 2 of 4
        assert!(outcome.matched);
        assert!((outcome.confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_content_similarity_boundary_is_strict() {
        let mut e = entry("x");
        e.manager_notes =
            "alpha bravo charlie delta echo foxtrot golf hotel india juliet".to_string();
        let mut r = recording("r1", "t");

        r.transcript = Some("alpha bravo charlie".to_string());
        let at_boundary = ContentSimilarityCriterion
            .evaluate(&e, &r, &MatchingConfig::default())
            .unwrap();
        assert!((at_boundary.confidence - 0.3).abs() < 1e-9);
        assert!(!at_boundary.matched, "3 of 10 keywords is not enough");

        r.transcript = Some("alpha bravo charlie delta".to_string());
        let above = ContentSimilarityCriterion
            .evaluate(&e, &r, &MatchingConfig::default())
            .unwrap();
        assert!((above.confidence - 0.4).abs() < 1e-9);
        assert!(above.matched);
    }

    #[test]
    fn test_content_similarity_disabled() {
        let config = MatchingConfig {
            enable_content_matching: false,
            ..Default::default()
        };
        let mut e = entry("x");
        e.manager_notes = "pricing".to_string();
        let mut r = recording("r1", "t");
        r.transcript = Some("pricing".to_string());

        let outcome = ContentSimilarityCriterion.evaluate(&e, &r, &config).unwrap();
        assert!(!outcome.matched);
        assert_eq!(outcome.confidence, 0.0);
    }

    #[test]
    fn test_content_similarity_requires_both_texts() {
        let mut e = entry("x");
        e.manager_notes = "pricing objection".to_string();
        let outcome = ContentSimilarityCriterion
            .evaluate(&e, &recording("r1", "t"), &MatchingConfig::default())
            .unwrap();
        assert!(!outcome.matched);
    }

    #[test]
    fn test_default_evaluators_cover_all_kinds() {
        let kinds: Vec<CriterionKind> = default_evaluators().iter().map(|e| e.kind()).collect();
        assert_eq!(kinds, CriterionKind::ALL.to_vec());
    }
}
