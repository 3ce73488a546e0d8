// ABOUTME: Parsed document handle and borrowed sub-tree regions over scraper's HTML tree.
// ABOUTME: Both expose the DocumentQuery capability defined in extractors::select.

//! DOM utilities for profile pages.
//!
//! [`ParsedDocument`] owns the parsed tree; [`Region`] borrows one element of
//! it so that sub-extractors can be handed an explicitly scoped view instead
//! of the whole page.

pub mod brs;

use scraper::{ElementRef, Html};

/// An owned, read-only parsed HTML page.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parse a full HTML document. Parsing is lenient and never fails.
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Access the underlying scraper tree.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The whole document as a region rooted at `<html>`.
    pub fn root(&self) -> Region<'_> {
        Region::new(self.html.root_element())
    }
}

impl From<Html> for ParsedDocument {
    fn from(html: Html) -> Self {
        Self { html }
    }
}

/// A sub-tree of a [`ParsedDocument`], rooted at a single element.
///
/// Queries against a region only see the region's descendants.
#[derive(Debug, Clone, Copy)]
pub struct Region<'a> {
    element: ElementRef<'a>,
}

impl<'a> Region<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self { element }
    }

    /// The element this region is rooted at.
    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }

    /// Tag name of the root element.
    pub fn name(&self) -> &'a str {
        self.element.value().name()
    }

    pub fn inner_html(&self) -> String {
        self.element.inner_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_region_is_html_element() {
        let doc = ParsedDocument::parse("<p>hi</p>");
        assert_eq!(doc.root().name(), "html");
    }

    #[test]
    fn test_parse_is_lenient() {
        let doc = ParsedDocument::parse("<div><span>unclosed");
        assert!(doc.root().inner_html().contains("unclosed"));
    }
}
