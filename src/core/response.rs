//! Discord length limits for announcement content
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord embed field value limit
pub const FIELD_LIMIT: usize = 1024;

/// Truncate text to `limit` bytes on a UTF-8 boundary, adding an ellipsis if needed
pub fn truncate_to(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit.saturating_sub(3); // Room for "..."
    while !text.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

/// Truncate text to fit the embed description limit
pub fn truncate_for_embed(text: &str) -> String {
    truncate_to(text, EMBED_LIMIT)
}

/// Truncate text to fit the message content limit
pub fn truncate_for_message(text: &str) -> String {
    truncate_to(text, MESSAGE_LIMIT)
}

/// Truncate text to fit an embed field value
pub fn truncate_for_field(text: &str) -> String {
    truncate_to(text, FIELD_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_for_message("hello"), "hello");
        assert_eq!(truncate_for_embed(""), "");
    }

    #[test]
    fn test_message_limit() {
        let result = truncate_for_message(&"a".repeat(2500));
        assert_eq!(result.len(), MESSAGE_LIMIT);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_embed_limit() {
        let result = truncate_for_embed(&"a".repeat(5000));
        assert!(result.len() <= EMBED_LIMIT);
    }

    #[test]
    fn test_truncate_utf8_boundary() {
        // Each emoji is 4 bytes; the cut must not land mid-character
        let text = "🎉".repeat(600);
        let result = truncate_for_field(&text);
        assert!(result.len() <= FIELD_LIMIT);
        assert!(result.trim_end_matches("...").chars().all(|c| c == '🎉'));
    }
}
