// src/extract/json.rs
// =============================================================================
// This module extracts references from JSON link documents.
//
// The format is the one management-style REST APIs use for navigation:
// a top-level "links" array whose elements carry an "href" string:
//
//   { "links": [ { "href": "servers" }, { "href": "deployments" } ] }
//
// One wrinkle: some serializers escape forward slashes inside string
// values, so an href can arrive as "path\/to\/resource". Any literal
// backslash-slash pair left after JSON decoding is collapsed to a plain
// slash before the value is treated as a URL.
//
// Anything that doesn't match the shape - no "links" field, a non-array
// "links", entries without an "href" - is skipped quietly. A document
// with nothing to offer is an empty result, never an error.
//
// Rust concepts:
// - serde_json::Value: dynamically-typed JSON tree
// - Option chaining: get() + as_array() / as_str() without panicking
// - continue: skipping one bad entry without giving up on the rest
// =============================================================================

use serde_json::Value;

// Extracts every href from a JSON document's top-level "links" array,
// in array order
//
// Parameters:
//   value: the parsed JSON document
//
// Returns: Vec<String> of href values with slash-escapes undone
pub fn extract_json_links(value: &Value) -> Vec<String> {
    let mut links = Vec::new();

    // Only a top-level object with a "links" array counts; everything
    // else is a document with no navigation
    let entries = match value.get("links").and_then(Value::as_array) {
        Some(entries) => entries,
        None => return links,
    };

    for entry in entries {
        // Each entry should be an object with an "href" string;
        // a malformed entry is skipped, not fatal
        let href = match entry.get("href").and_then(Value::as_str) {
            Some(href) => href,
            None => continue,
        };

        links.push(unescape_href(href));
    }

    links
}

// Collapses literal backslash-slash pairs that slash-escaping
// serializers leave inside string values
fn unescape_href(href: &str) -> String {
    href.replace("\\/", "/")
}
