//! Sequence similarity between normalized drug names.

use rapidfuzz::fuzz;

/// Similarity ratio in `0.0..=1.0`: twice the matched characters over the
/// combined length of both names. Identical names score `1.0`.
pub fn similarity(left: &str, right: &str) -> f64 {
    if left.is_empty() && right.is_empty() {
        return 1.0;
    }
    fuzz::ratio(left.chars(), right.chars())
}
