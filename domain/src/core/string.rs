//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        let target = max_len.saturating_sub(3);
        let mut end = target.min(s.len());
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

/// Single-line preview of user text for log messages
pub fn preview(s: &str, max_len: usize) -> String {
    let flat = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&flat, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is 2 bytes: "café au lait" cut at 6 bytes -> target 3 -> "caf"
        assert_eq!(truncate("café au lait", 6), "caf...");
        // target lands inside 'é' (bytes 3..5) and backs up to 3
        assert_eq!(truncate("café au lait", 7), "caf...");
        assert_eq!(truncate("café", 20), "café");
    }

    #[test]
    fn test_preview_flattens_whitespace() {
        assert_eq!(preview("a  fitness\n\napp", 50), "a fitness app");
        assert_eq!(preview("one two three four", 10), "one two...");
    }
}
