//! Identifier extraction from free-text recording titles.
//!
//! Titles such as `"Sales Call CALL_042 Demo"` carry the loose identifiers that
//! scorecard rows refer to. These helpers pull those tokens out and normalize
//! identifiers so that punctuation differences do not defeat exact lookup.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Alphanumeric-prefixed codes: `CALL_001`, `Meeting-456`, `ABC123`.
static PREFIXED_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z]+[_-]?\d+\b").expect("valid prefixed code regex"));

/// Dash/underscore joined words ending in a number: `sales_call_042`, `q3-review-7`.
static JOINED_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9]+(?:[_-][A-Za-z]+)*[_-]\d+\b").expect("valid joined code regex")
});

/// Bare integers of three or more digits.
static BARE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3,}\b").expect("valid bare number regex"));

/// Extract ID-shaped tokens from a title.
///
/// Tokens are lower-cased and de-duplicated. The set is ordered so that
/// downstream index construction is deterministic.
pub fn extract_tokens(title: &str) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();

    for re in [&*PREFIXED_CODE, &*JOINED_CODE, &*BARE_NUMBER] {
        for m in re.find_iter(title) {
            tokens.insert(m.as_str().to_lowercase());
        }
    }

    tokens
}

/// Strip every non-alphanumeric character and lower-case the rest.
pub fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Separator variants of a raw identifier.
///
/// The identifier is split on any non-alphanumeric run and re-joined with no
/// separator, `_` and `-`, in that order. Duplicates are dropped so the list
/// can be probed front to back with a deterministic first hit.
pub fn id_variations(id: &str) -> Vec<String> {
    let parts: Vec<String> = id
        .split(|c: char| !c.is_alphanumeric())
        .filter(|p| !p.is_empty())
        .map(str::to_lowercase)
        .collect();

    if parts.is_empty() {
        return Vec::new();
    }

    let mut variations: Vec<String> = Vec::with_capacity(3);
    for sep in ["", "_", "-"] {
        let joined = parts.join(sep);
        if !variations.contains(&joined) {
            variations.push(joined);
        }
    }
    variations
}
