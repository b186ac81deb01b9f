//! Text helpers for log lines and error messages.

/// Single-line preview of `s` of at most `max_chars` characters.
///
/// Runs of whitespace (including newlines) collapse to one space; a
/// truncated preview ends with `...`.
pub fn preview(s: &str, max_chars: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let kept: String = collapsed.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
    }

    #[test]
    fn test_preview_collapses_whitespace() {
        assert_eq!(preview("a\n\n  b\tc", 20), "a b c");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("hello world", 8), "hello...");
        assert_eq!(preview("ピタゴラスの定理", 5), "ピタ...");
    }
}
