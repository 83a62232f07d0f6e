//! Fetch a web page, project it, preview or export it
//!
//! - Fetch: one blocking GET ([`fetch`])
//! - Parse: permissive HTML parsing ([`document`])
//! - Project: raw HTML, visible text, link or image attributes ([`extractors`])
//! - Preview: 10,000 character cut ([`preview`])
//! - Export: `<dir>/<name>.csv`, written atomically ([`export`])

pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod extractors;
pub mod fetch;
pub mod logging;
pub mod preview;
pub mod session;

pub use document::{AttrValue, Document, Element};
pub use error::{Field, Result, ScrapeError};
pub use extractors::{attribute_rows, extract_attributes, extract_text, AttributeRow, Filter};
pub use fetch::{Fetch, HttpFetcher};
pub use session::Session;

/// Parse HTML text into a queryable [`Document`]
pub fn parse(html: &str) -> Document {
    Document::parse(html)
}

/// Elements named `tag` in document order, case-insensitive.
///
/// `html`, `head` and `body` always match once, even when the markup
/// omits them.
pub fn find_by_tag<'a>(doc: &'a Document, tag: &str) -> Vec<Element<'a>> {
    doc.find_by_tag(tag)
}

/// Fetch `url` with a default [`HttpFetcher`]
pub fn fetch(url: &str) -> Result<String> {
    HttpFetcher::default().fetch(url)
}
