/// Output Normalizer
///
/// Two independent transforms over independently-sourced strings:
/// - `normalize` produces the comparison form (equality checks against
///   expected output). Never stored.
/// - `truncate_for_display` produces the bounded storage form applied to
///   every text field of a persisted outcome. Never compared.

/// Stored outcome fields are capped at this many characters plus the
/// ellipsis marker.
pub const DISPLAY_MAX_LEN: usize = 50;

/// Canonicalize an output string for comparison: drop every carriage
/// return and line feed, then trim surrounding whitespace. Interior
/// spacing and case are preserved.
pub fn normalize(s: &str) -> String {
    s.replace(&['\r', '\n'][..], "").trim().to_string()
}

/// Bound a string for storage: unchanged when it fits, otherwise the
/// first `max_len` characters followed by an ellipsis marker.
/// Idempotent - re-truncating a truncated string is a no-op.
pub fn truncate_for_display(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let mut truncated: String = s.chars().take(max_len).collect();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}
