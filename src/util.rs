// src/util.rs — Shared utility functions

/// The first `max_chars` characters of `s` (UTF-8 safe).
pub fn first_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
