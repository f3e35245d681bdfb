// src/extract/mod.rs
// =============================================================================
// This module turns a fetched body into a list of outbound references.
//
// Submodules:
// - html: pulls href attributes out of anchor tags
// - json: pulls href fields out of a top-level "links" array
//
// This file (mod.rs) defines the Document type - a tagged variant over
// the body shapes we understand - and the extract_links dispatch that
// picks the right extractor for each shape. A body we don't understand
// becomes Document::Other, which simply yields no links (the bytes are
// still mirrored to disk; we just can't follow anything from them).
//
// Rust concepts:
// - Enums as tagged unions: one type, three possible shapes
// - match: dispatching on the shape without any dynamic casting
// - Result<T, String>: decode failures carry a human-readable cause
// =============================================================================

mod html;
mod json;

use serde_json::Value;

// A fetched body in decoded form, tagged by what the server declared it is
#[derive(Debug, Clone)]
pub enum Document {
    /// An HTML page, kept as text and parsed lazily during extraction
    Html(String),
    /// A JSON document, fully parsed
    Json(Value),
    /// Anything else - mirrored verbatim but never followed
    Other,
}

impl Document {
    // Decodes raw bytes according to the declared content type.
    //
    // Only the types we extract links from have decode expectations;
    // everything else is accepted as-is under Document::Other.
    pub fn decode(content_type: &str, raw: &[u8]) -> Result<Document, String> {
        if is_json_content(content_type) {
            match serde_json::from_slice(raw) {
                Ok(value) => Ok(Document::Json(value)),
                Err(e) => Err(format!("invalid JSON body: {}", e)),
            }
        } else if is_html_content(content_type) {
            match std::str::from_utf8(raw) {
                Ok(text) => Ok(Document::Html(text.to_string())),
                Err(e) => Err(format!("HTML body is not valid UTF-8: {}", e)),
            }
        } else {
            Ok(Document::Other)
        }
    }
}

// Does this content type declare a JSON body?
// Matches "application/json" as well as vendor types like
// "application/vnd.api+json; charset=utf-8"
pub fn is_json_content(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("json")
}

// Does this content type declare an HTML body?
fn is_html_content(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("html")
}

// Extracts the raw outbound references from a decoded body, in the
// order they appear. References come back exactly as written in the
// document - resolving them against a base URL is the caller's job.
pub fn extract_links(document: &Document) -> Vec<String> {
    match document {
        Document::Html(text) => html::extract_html_links(text),
        Document::Json(value) => json::extract_json_links(value),
        Document::Other => Vec::new(),
    }
}
