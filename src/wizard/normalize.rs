//! Keystroke-level normalization of tax identifier input

/// Uppercase the input and drop everything but ASCII letters and digits.
///
/// Applied on every edit of a GST or PAN field, before any validation.
/// Idempotent.
pub fn normalize_tax_id(raw: &str) -> String {
    raw.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        .collect()
}

/// Normalize and cap at `max_len` characters
pub fn normalize_tax_id_capped(raw: &str, max_len: usize) -> String {
    normalize_tax_id(raw).chars().take(max_len).collect()
}
