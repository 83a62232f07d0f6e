//! HTML projections
//!
//! Each module provides one read-only view over a parsed document.

mod attribute_extractor;
mod text_extractor;

pub use attribute_extractor::*;
pub use text_extractor::*;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;

use crate::document::Document;

/// Attributes reported for `<a>` elements
pub const LINK_ATTRIBUTES: &[&str] = &["id", "class", "href"];

/// Attributes reported for `<img>` elements
pub const IMAGE_ATTRIBUTES: &[&str] = &["id", "class", "src", "alt"];

/// What part of a page the user wants to keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Raw HTML, untouched
    #[default]
    All,
    /// Visible text
    Text,
    /// id, class and href of every link
    Links,
    /// id, class, src and alt of every image
    Images,
}

impl Filter {
    /// Project fetched HTML through this filter.
    ///
    /// Attribute projections come back one row per line.
    pub fn apply(&self, html: &str) -> String {
        debug!(filter = %self, "applying filter");
        match self {
            Filter::All => html.to_string(),
            Filter::Text => extract_text(&Document::parse(html)),
            Filter::Links | Filter::Images => self
                .rows(html)
                .iter()
                .map(AttributeRow::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Typed rows behind the Links and Images projections. Empty for the
    /// other filters.
    pub fn rows(&self, html: &str) -> Vec<AttributeRow> {
        let (tag, attrs) = match self {
            Filter::Links => ("a", LINK_ATTRIBUTES),
            Filter::Images => ("img", IMAGE_ATTRIBUTES),
            Filter::All | Filter::Text => return vec![],
        };
        let doc = Document::parse(html);
        attribute_rows(&doc.find_by_tag(tag), attrs)
    }

    pub fn is_attribute_projection(&self) -> bool {
        matches!(self, Filter::Links | Filter::Images)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::All => "all",
            Filter::Text => "text",
            Filter::Links => "links",
            Filter::Images => "images",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown filter {0:?} (expected all, text, links or images)")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "text" => Ok(Filter::Text),
            "links" => Ok(Filter::Links),
            "images" => Ok(Filter::Images),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}
