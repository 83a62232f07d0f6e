//! Parsed HTML documents and read-only element views
//!
//! Uses the scraper crate (html5ever underneath), so malformed markup is
//! repaired the way browsers do it rather than rejected.

use scraper::{ElementRef, Html, Node};
use tracing::debug;

/// Attributes that hold a whitespace-separated list of tokens
const MULTI_VALUED_ATTRIBUTES: &[&str] = &[
    "class",
    "rel",
    "rev",
    "accept-charset",
    "headers",
    "accesskey",
    "dropzone",
];

/// Elements whose text content is never rendered
const HIDDEN_TEXT_ELEMENTS: &[&str] = &["script", "style", "template"];

/// A parsed HTML payload
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse markup permissively. Never fails.
    pub fn parse(html: &str) -> Self {
        debug!(bytes = html.len(), "parsing document");
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements named `tag`, compared ASCII case-insensitively, in
    /// document order.
    ///
    /// The parser always builds an `html`, `head` and `body` element, so
    /// those three match once each even when the markup never wrote them.
    pub fn find_by_tag(&self, tag: &str) -> Vec<Element<'_>> {
        let found: Vec<Element<'_>> = self
            .html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| el.value().name().eq_ignore_ascii_case(tag))
            .map(Element)
            .collect();
        debug!(tag, count = found.len(), "find_by_tag");
        found
    }

    /// Visible text nodes concatenated in document order, unmodified.
    pub fn raw_text(&self) -> String {
        let mut text = String::new();
        for node in self.html.root_element().descendants() {
            let Node::Text(t) = node.value() else {
                continue;
            };
            let hidden = node
                .ancestors()
                .filter_map(ElementRef::wrap)
                .any(|el| HIDDEN_TEXT_ELEMENTS.contains(&el.value().name()));
            if !hidden {
                text.push_str(t);
            }
        }
        text
    }
}

/// Value of one attribute on an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue<'a> {
    Single(&'a str),
    List(Vec<&'a str>),
}

impl AttrValue<'_> {
    /// Flatten to one string; list members are joined with a single space.
    pub fn joined(&self) -> String {
        match self {
            AttrValue::Single(s) => (*s).to_string(),
            AttrValue::List(items) => items.join(" "),
        }
    }
}

/// Read-only view of an element, borrowed from its [`Document`]
#[derive(Debug, Clone, Copy)]
pub struct Element<'a>(ElementRef<'a>);

impl<'a> Element<'a> {
    /// Lowercase tag name
    pub fn name(&self) -> &'a str {
        self.0.value().name()
    }

    pub fn attr(&self, name: &str) -> Option<AttrValue<'a>> {
        let value = self.0.value().attr(name)?;
        if MULTI_VALUED_ATTRIBUTES.contains(&name) {
            Some(AttrValue::List(value.split_whitespace().collect()))
        } else {
            Some(AttrValue::Single(value))
        }
    }

    /// Text beneath this element
    pub fn text(&self) -> String {
        self.0.text().collect()
    }

    /// Outer HTML of this element
    pub fn html(&self) -> String {
        self.0.html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_tag_document_order() {
        let html = r#"
        <html>
        <body>
            <a href="/one">One</a>
            <div><a href="/two">Two</a></div>
            <p>text</p>
            <a href="/three">Three</a>
        </body>
        </html>
        "#;

        let doc = Document::parse(html);
        let links = doc.find_by_tag("a");
        let texts: Vec<String> = links.iter().map(|l| l.text()).collect();
        assert_eq!(texts, vec!["One", "Two", "Three"]);
        assert_eq!(links[1].html(), r#"<a href="/two">Two</a>"#);
    }

    #[test]
    fn test_find_by_tag_case_insensitive() {
        let doc = Document::parse(r#"<A HREF="/x">x</A><a href="/y">y</a><IMG SRC="i.png">"#);

        assert_eq!(doc.find_by_tag("a").len(), 2);
        assert_eq!(doc.find_by_tag("A").len(), 2);
        assert_eq!(doc.find_by_tag("Img").len(), 1);
        assert_eq!(doc.find_by_tag("a")[0].name(), "a");
    }

    #[test]
    fn test_find_by_tag_no_match() {
        let doc = Document::parse("<p>nothing here</p>");
        assert!(doc.find_by_tag("img").is_empty());
        assert!(doc.find_by_tag("not a selector").is_empty());
        assert!(doc.find_by_tag("").is_empty());
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let doc = Document::parse("<div><a href='/x'>unclosed <blink>old<p>para");
        assert_eq!(doc.find_by_tag("a").len(), 1);
        assert_eq!(doc.find_by_tag("blink").len(), 1);
        assert!(doc.raw_text().contains("para"));
    }

    #[test]
    fn test_class_is_multi_valued() {
        let doc = Document::parse(r#"<a class="  btn   primary " id="go" href="/go">Go</a>"#);
        let link = doc.find_by_tag("a")[0];

        assert_eq!(
            link.attr("class"),
            Some(AttrValue::List(vec!["btn", "primary"]))
        );
        assert_eq!(link.attr("class").unwrap().joined(), "btn primary");
        assert_eq!(link.attr("id"), Some(AttrValue::Single("go")));
        assert_eq!(link.attr("title"), None);
    }

    #[test]
    fn test_raw_text_skips_scripts_and_styles() {
        let html = r#"<html><head><style>p { color: red }</style>
        <script>var x = 1;</script></head>
        <body><p>Shown</p><!-- hidden comment --></body></html>"#;

        let text = Document::parse(html).raw_text();
        assert!(text.contains("Shown"));
        assert!(!text.contains("color"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("hidden comment"));
    }

    #[test]
    fn test_raw_text_skips_nested_hidden_content() {
        let doc = Document::parse(
            "<p>shown</p><template><div>secret <span>deeper</span></div></template><p>after</p>",
        );
        assert_eq!(doc.raw_text(), "shownafter");
    }

    #[test]
    fn test_implied_structure_elements_match() {
        let doc = Document::parse("<p>no explicit body</p>");
        assert_eq!(doc.find_by_tag("html").len(), 1);
        assert_eq!(doc.find_by_tag("head").len(), 1);
        assert_eq!(doc.find_by_tag("body").len(), 1);
    }
}
