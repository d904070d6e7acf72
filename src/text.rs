//! Character-safe string helpers

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn take_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Like [`take_chars`], but appends `...` when something was cut.
pub fn truncate_with_marker(text: &str, max_chars: usize) -> String {
    let head = take_chars(text, max_chars);
    if head.len() < text.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_chars_respects_multibyte() {
        assert_eq!(take_chars("Société Générale", 7), "Société");
        assert_eq!(take_chars("abc", 10), "abc");
        assert_eq!(take_chars("", 3), "");
    }

    #[test]
    fn test_truncate_marker_only_when_cut() {
        assert_eq!(truncate_with_marker("abcdef", 3), "abc...");
        assert_eq!(truncate_with_marker("abc", 3), "abc");
    }
}
