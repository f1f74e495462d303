#![deny(unsafe_code)]

/// Normalize a free-text drug name into store-key form.
///
/// Trims, lowercases, and joins internal whitespace runs with `_`, so
/// `"  Piperacilina  Tazobactam "` becomes `"piperacilina_tazobactam"`.
/// The store applies the same function to its keys at load time.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
