//! Canonical key normalization for reference-table lookups.
//!
//! Every string key that enters a lookup table — mold codes, piece codes,
//! mold parts, operator codes — passes through [`normalize_key`], both at
//! ingestion and at query time. Centralizing this guarantees that a code
//! typed as `" d-17 "` matches a sheet cell holding `"D17"` or `"D-17"`.

/// Normalizes a lookup key: trim, uppercase, fold Spanish accented vowels,
/// then strip everything outside `A-Z`, `0-9` and `Ñ`.
///
/// Leading zeros survive (`"007"` stays `"007"`), which matters for
/// operator codes stored as text.
pub fn normalize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .flat_map(char::to_uppercase)
        .map(|c| match c {
            'Á' => 'A',
            'É' => 'E',
            'Í' => 'I',
            'Ó' => 'O',
            'Ú' => 'U',
            'Ü' => 'U',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == 'Ñ')
        .collect()
}

/// True when the input holds nothing after trimming. Form fields use empty
/// strings for "not entered".
pub fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}
