//! Helpers for Telegram MarkdownV2 text.

/// Characters with special meaning in MarkdownV2 that must be backslash-escaped
/// when they appear as literal text.
const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Escapes user-supplied text for MarkdownV2 parsing mode.
///
/// # Example
/// ```
/// use event_reminder_bot::utils::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("Gran Premio (Monza)"), "Gran Premio \\(Monza\\)");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Wraps already-escaped text in bold markers.
pub fn bold(escaped: &str) -> String {
    format!("*{escaped}*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_event_text() {
        assert_eq!(escape_markdown("10-06-2024"), "10\\-06\\-2024");
        assert_eq!(escape_markdown("Round 3: Monza!"), "Round 3: Monza\\!");
        assert_eq!(escape_markdown("[qualifying] *fast*"), "\\[qualifying\\] \\*fast\\*");
    }

    #[test]
    fn test_escape_backslash_first_class() {
        assert_eq!(escape_markdown("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_empty_and_plain_text() {
        assert_eq!(escape_markdown(""), "");
        assert_eq!(escape_markdown("plain text"), "plain text");
    }

    #[test]
    fn test_bold() {
        assert_eq!(bold(&escape_markdown("Next.")), "*Next\\.*");
    }
}
