// src/extract/html.rs
// =============================================================================
// This module extracts references from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// The hrefs come back untouched and in document order; the traversal
// resolves them against the page URL and decides which ones to follow.
//
// Rust concepts:
// - Iterators: For walking the selected elements
// - if let: Handling elements that do or don't carry an attribute
// =============================================================================

use scraper::{Html, Selector};

// Extracts every anchor href from HTML content, in document order
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//
// Returns: Vec<String> of raw href values, exactly as written
//
// Example:
//   html = "<a href='/docs'>Docs</a><a href='next'>Next</a>"
//   result = ["/docs", "next"]
pub fn extract_html_links(html: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Parse the HTML into a document
    let document = Html::parse_document(html);

    // Create a CSS selector to find all <a> tags with an href.
    // Selector::parse returns Result, so we use .unwrap() which panics on
    // error - OK here because our selector is a constant and known valid
    let selector = Selector::parse("a[href]").unwrap();

    // select() walks the tree in document order, which is exactly the
    // order we want references followed in
    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            links.push(href.to_string());
        }
    }

    links
}
