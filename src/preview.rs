//! Preview truncation

use tracing::debug;

/// Maximum number of characters shown in a preview
pub const PREVIEW_LIMIT: usize = 10_000;

/// First [`PREVIEW_LIMIT`] characters of `text`
pub fn truncate_preview(text: &str) -> &str {
    truncate_chars(text, PREVIEW_LIMIT)
}

/// Hard cut after `limit` characters. Not word aware, never splits a
/// code point.
pub fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => {
            debug!(limit, "preview text too long, truncating");
            &text[..cut]
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_text_is_cut_to_limit() {
        let text = "x".repeat(15_000);
        let preview = truncate_preview(&text);
        assert_eq!(preview.chars().count(), PREVIEW_LIMIT);
        assert_eq!(preview, &text[..PREVIEW_LIMIT]);
    }

    #[test]
    fn test_short_text_is_unchanged() {
        assert_eq!(truncate_preview("short"), "short");

        let exact = "y".repeat(PREVIEW_LIMIT);
        assert_eq!(truncate_preview(&exact).len(), PREVIEW_LIMIT);
    }

    #[test]
    fn test_cut_counts_characters_not_bytes() {
        let text = "é".repeat(12);
        let cut = truncate_chars(&text, 10);
        assert_eq!(cut, "é".repeat(10));
        assert_eq!(cut.len(), 20);
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(truncate_chars("abc", 0), "");
    }
}
