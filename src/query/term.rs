//! Search term normalization

/// Turn a raw search term into a single lowercase alphanumeric token.
///
/// Completion indices only hold single words, so only the first
/// space-delimited segment is kept. Everything outside `[a-z0-9]` is dropped,
/// which also keeps the token safe to splice into a serialized query. The
/// result may be empty.
pub fn normalize_term(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let first = lowered.split(' ').next().unwrap_or_default();

    first.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}
