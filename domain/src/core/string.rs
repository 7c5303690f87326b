//! String helpers for log previews.

/// Shorten `s` to at most `max_len` bytes for log output, appending `...`.
///
/// Cuts on a UTF-8 character boundary.
pub fn preview(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
