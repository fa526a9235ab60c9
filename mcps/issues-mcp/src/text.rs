//! Small text helpers shared by the client and the formatter

/// Keep at most `max` characters of `text`, reporting whether anything was cut
pub fn truncate_chars(text: &str, max: usize) -> (&str, bool) {
    match text.char_indices().nth(max) {
        Some((index, _)) => (&text[..index], true),
        None => (text, false),
    }
}

/// Like [`truncate_chars`], appending `...` when the text was cut
pub fn excerpt(text: &str, max: usize) -> String {
    match truncate_chars(text, max) {
        (head, true) => format!("{head}..."),
        (head, false) => head.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_on_char_boundary() {
        assert_eq!(truncate_chars("héllo", 2), ("hé", true));
        assert_eq!(truncate_chars("héllo", 5), ("héllo", false));
        assert_eq!(truncate_chars("", 3), ("", false));
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("abcdef", 3), "abc...");
        assert_eq!(excerpt("abc", 3), "abc");
    }
}
