//! One-shot lookup index over the candidate recordings of a batch.
//!
//! Built once per batch run, never mutated afterwards, and borrowed by every
//! entry evaluation. There is no process-wide cache: two batches never share
//! an index.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::identifiers::{extract_tokens, id_variations, normalize};
use crate::matching::types::RecordingCandidate;

/// Lookup maps over a borrowed slice of recordings.
#[derive(Debug, Default)]
pub struct RecordingIndex<'a> {
    by_token: HashMap<String, &'a RecordingCandidate>,
    by_title: HashMap<String, Vec<&'a RecordingCandidate>>,
    by_date: HashMap<String, Vec<&'a RecordingCandidate>>,
    len: usize,
}

impl<'a> RecordingIndex<'a> {
    /// Index all recordings in a single pass.
    ///
    /// Token collisions resolve to the recording seen last.
    pub fn build(recordings: &'a [RecordingCandidate]) -> Self {
        let mut index = Self {
            len: recordings.len(),
            ..Default::default()
        };

        for recording in recordings {
            for token in extract_tokens(&recording.title) {
                let normalized = normalize(&token);
                if !normalized.is_empty() {
                    index.by_token.insert(normalized, recording);
                }
                index.by_token.insert(token, recording);
            }

            index
                .by_title
                .entry(normalize(&recording.title))
                .or_default()
                .push(recording);

            index
                .by_date
                .entry(recording.effective_date().to_string())
                .or_default()
                .push(recording);
        }

        index
    }

    /// Resolve a scorecard identifier to a recording by exact token lookup.
    ///
    /// Tries the normalized identifier first, then each separator variation.
    pub fn find_exact_id(&self, call_identifier: &str) -> Option<&'a RecordingCandidate> {
        let normalized = normalize(call_identifier);
        if normalized.is_empty() {
            return None;
        }

        if let Some(recording) = self.by_token.get(&normalized) {
            return Some(*recording);
        }

        id_variations(call_identifier)
            .iter()
            .find_map(|variation| self.by_token.get(variation).copied())
    }

    /// Recordings whose normalized title equals the normalized `title`.
    pub fn find_by_title(&self, title: &str) -> &[&'a RecordingCandidate] {
        self.by_title
            .get(&normalize(title))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Recordings whose call date (or creation date) falls on `date`.
    pub fn find_by_date(&self, date: NaiveDate) -> &[&'a RecordingCandidate] {
        self.by_date
            .get(&date.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of recordings indexed.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct identifier tokens.
    pub fn token_count(&self) -> usize {
        self.by_token.len()
    }
}
