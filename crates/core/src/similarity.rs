//! Edit-distance based string similarity.
//!
//! Used by the fuzzy title criterion. Both functions are pure and operate on
//! Unicode scalar values, not bytes.

/// Calculate Levenshtein edit distance between two strings.
///
/// Classic single-character insert/delete/substitute distance computed with a
/// full dynamic-programming matrix, `O(len(a) * len(b))` in time and space.
/// Callers matching very long strings should cap their length first.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0usize; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, val) in matrix[0].iter_mut().enumerate() {
        *val = j;
    }

    for (i, a_char) in a_chars.iter().enumerate() {
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            matrix[i + 1][j + 1] = (matrix[i][j + 1] + 1)
                .min(matrix[i + 1][j] + 1)
                .min(matrix[i][j] + cost);
        }
    }

    matrix[a_len][b_len]
}

/// Case-insensitive similarity in `[0, 1]`.
///
/// `1 - distance / max(len(a), len(b))`. Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }

    let distance = levenshtein_distance(&a, &b);
    (1.0 - distance as f64 / max_len as f64).clamp(0.0, 1.0)
}
