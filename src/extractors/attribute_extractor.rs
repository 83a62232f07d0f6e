//! Attribute projection over a list of elements

use std::fmt;

use tracing::debug;

use crate::document::Element;

/// Requested attribute values of one element, in request order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRow {
    pub fields: Vec<(String, String)>,
}

impl AttributeRow {
    /// Build a row for `element`. Missing attributes become empty strings.
    pub fn from_element(element: &Element<'_>, attr_names: &[&str]) -> Self {
        let fields = attr_names
            .iter()
            .map(|name| {
                let value = element.attr(name).map(|v| v.joined()).unwrap_or_default();
                ((*name).to_string(), value)
            })
            .collect();
        Self { fields }
    }

    /// True when no field carries a value
    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, value)| value.is_empty())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }
}

impl fmt::Display for AttributeRow {
    /// Values joined with `,`, without any quoting
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(value)?;
        }
        Ok(())
    }
}

/// Rows for each element, blank rows dropped, element order kept
pub fn attribute_rows(elements: &[Element<'_>], attr_names: &[&str]) -> Vec<AttributeRow> {
    let rows: Vec<AttributeRow> = elements
        .iter()
        .map(|el| AttributeRow::from_element(el, attr_names))
        .filter(|row| !row.is_blank())
        .collect();
    debug!(
        elements = elements.len(),
        kept = rows.len(),
        "attribute_rows"
    );
    rows
}

/// Comma-joined attribute values per element, blank rows dropped
pub fn extract_attributes(elements: &[Element<'_>], attr_names: &[&str]) -> Vec<String> {
    attribute_rows(elements, attr_names)
        .iter()
        .map(AttributeRow::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;

    #[test]
    fn test_blank_rows_are_dropped() {
        let doc = Document::parse(r#"<a href="x" id="1">t</a><a href="">u</a>"#);
        let links = doc.find_by_tag("a");

        assert_eq!(extract_attributes(&links, &["id", "href"]), vec!["1,x"]);
    }

    #[test]
    fn test_one_non_empty_field_keeps_row() {
        let html = r#"
            <a href="/only-href">a</a>
            <a id="only-id">b</a>
            <a>c</a>
            <a class="nav link">d</a>
        "#;
        let doc = Document::parse(html);
        let links = doc.find_by_tag("a");

        assert_eq!(
            extract_attributes(&links, &["id", "class", "href"]),
            vec![",,/only-href", "only-id,,", ",nav link,"]
        );
    }

    #[test]
    fn test_image_attributes() {
        let html = r#"
            <img id="logo" class="brand  big" src="/logo.png" alt="Logo">
            <img src="/spacer.gif">
            <img>
        "#;
        let doc = Document::parse(html);
        let images = doc.find_by_tag("img");

        assert_eq!(
            extract_attributes(&images, &["id", "class", "src", "alt"]),
            vec!["logo,brand big,/logo.png,Logo", ",,/spacer.gif,"]
        );
    }

    #[test]
    fn test_commas_inside_values_are_not_escaped() {
        let doc = Document::parse(r#"<img src="/a.png" alt="red, green">"#);
        let images = doc.find_by_tag("img");

        assert_eq!(
            extract_attributes(&images, &["src", "alt"]),
            vec!["/a.png,red, green"]
        );
    }

    #[test]
    fn test_no_attribute_names() {
        let doc = Document::parse(r#"<a href="x">t</a>"#);
        let links = doc.find_by_tag("a");

        assert!(extract_attributes(&links, &[]).is_empty());
        assert!(extract_attributes(&[], &["href"]).is_empty());
    }

    #[test]
    fn test_rows_keep_field_names() {
        let doc = Document::parse(r#"<a href="/x" rel="nofollow  noopener">t</a>"#);
        let links = doc.find_by_tag("a");
        let rows = attribute_rows(&links, &["href", "rel"]);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].fields,
            vec![
                ("href".to_string(), "/x".to_string()),
                ("rel".to_string(), "nofollow noopener".to_string()),
            ]
        );
        assert!(!rows[0].is_blank());
    }
}
