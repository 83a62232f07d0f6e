//! Plain-text projection

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::document::Document;

static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

/// Visible text of the document with every newline run collapsed to one `\n`
pub fn extract_text(doc: &Document) -> String {
    let text = collapse_newlines(&doc.raw_text());
    debug!(chars = text.chars().count(), "extract_text");
    text
}

/// Collapse each run of consecutive `\n` into a single `\n`
pub fn collapse_newlines(text: &str) -> String {
    NEWLINE_RUN.replace_all(text, "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraphs_separated_by_blank_lines() {
        let doc = Document::parse("<p>Hello</p>\n\n\n<p>World</p>");
        assert_eq!(extract_text(&doc), "Hello\nWorld");
    }

    #[test]
    fn test_collapse_long_runs() {
        // far longer than any fixed number of pairwise replacement passes
        let input = format!("a{}b\n\nc\nd", "\n".repeat(5000));
        assert_eq!(collapse_newlines(&input), "a\nb\nc\nd");
    }

    #[test]
    fn test_collapse_preserves_other_text() {
        let input = "\n\n  first line \r\n\n second\t\n";
        let collapsed = collapse_newlines(input);
        assert_eq!(collapsed, "\n  first line \r\n second\t\n");
        assert!(!collapsed.contains("\n\n"));
        assert_eq!(collapsed.replace('\n', ""), input.replace('\n', ""));
    }

    #[test]
    fn test_extract_text_has_no_double_newlines() {
        let html = r#"<html>
        <head><title>Title</title>


        </head>
        <body>

            <h1>Heading</h1>


            <ul>
                <li>One</li>

                <li>Two</li>
            </ul>
            <script>

            var hidden = true;

            </script>
        </body>
        </html>"#;

        let text = extract_text(&Document::parse(html));
        assert!(!text.contains("\n\n"));

        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, vec!["Title", "Heading", "One", "Two"]);
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(extract_text(&Document::parse("")), "");
    }

    #[test]
    fn test_nested_template_content_is_hidden() {
        let doc = Document::parse("<p>shown</p><template><div>secret</div></template>");
        assert_eq!(extract_text(&doc), "shown");
    }
}
