// src/store/path.rs
// =============================================================================
// This module derives the file path a resource is mirrored to.
//
// The layout mirrors the URL:
//
//   <output root> / <host dir> / <path segments>
//
// with three wrinkles:
// - A host with an explicit port becomes "host_port" (a colon is not a
//   safe directory character everywhere)
// - The URL path is percent-decoded and then re-encoded segment by
//   segment: slashes (decoded ones included) act as directory
//   separators, everything else ends up percent-encoded on disk
// - An empty or directory-like path ("/a/b/") gets a default leaf
//   filename appended, so every identity maps to a concrete file and
//   never to a bare directory
//
// The query string plays no part in the path: two URLs differing only
// in their query land on the same file, last write wins.
//
// Rust concepts:
// - PathBuf: building OS-correct paths one component at a time
// - Cow<str>: urlencoding returns borrowed or owned data as needed
// =============================================================================

use std::path::{Path, PathBuf};

use crate::extract::is_json_content;
use crate::identity::ResourceIdentity;

// Derives the mirror path for one resource.
//
// Pure function of (output_root, identity, content_type): calling it
// again with the same inputs always produces the same path.
//
// Examples (root = "out"):
//   https://h.test/a/b/   + json -> out/h.test/a/b/index.json
//   https://h.test        + html -> out/h.test/index.html
//   https://h.test:7001/x + html -> out/h.test_7001/x
pub fn mirror_path(output_root: &Path, identity: &ResourceIdentity, content_type: &str) -> PathBuf {
    let raw_path = identity.path().trim_start_matches('/');

    // Decode first so pre-encoded input doesn't get encoded twice...
    let mut relative = match urlencoding::decode(raw_path) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw_path.to_string(), // undecodable bytes stay as written
    };

    // Directory-like paths need a concrete filename
    if relative.is_empty() || relative.ends_with('/') {
        relative.push_str(default_leaf(content_type));
    }

    let mut full = output_root.join(host_dirname(identity));

    // ...then re-encode each segment, keeping slashes as separators
    for segment in relative.split('/') {
        if segment.is_empty() {
            continue; // collapse duplicate separators
        }
        full.push(urlencoding::encode(segment).into_owned());
    }

    full
}

// The filename used when the URL path doesn't name a file itself
pub fn default_leaf(content_type: &str) -> &'static str {
    if is_json_content(content_type) {
        "index.json"
    } else {
        "index.html"
    }
}

// The directory a host's files live under; an explicit port is folded
// in with an underscore
fn host_dirname(identity: &ResourceIdentity) -> String {
    // http/https identities always carry a host; the fallback only
    // exists so this function is total
    let host = identity.host().unwrap_or("unknown-host");
    match identity.port() {
        Some(port) => format!("{}_{}", host, port),
        None => host.to_string(),
    }
}
