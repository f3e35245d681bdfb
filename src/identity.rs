// src/identity.rs
// =============================================================================
// This module defines ResourceIdentity - the normalized form of a URL that
// the rest of the program uses to decide "have we seen this resource before?"
//
// Why normalize?
// - "HTTPS://Example.COM/a" and "https://example.com/a" are the same page
// - Fragments (#section) point inside a page, not at a different page
// - If we compared raw strings, the same page could be fetched twice
//
// The `url` crate does the heavy lifting: parsing canonicalizes the scheme
// and host to lowercase, drops default ports, and cleans up the path.
// We add fragment stripping on top, so two identities are equal exactly
// when they name the same fetchable resource.
//
// Rust concepts:
// - Newtype pattern: wrapping Url in our own struct to control its API
// - Derived traits: Eq + Hash let identities live in a HashSet
// - Option<T>: for operations that can produce "no identity"
// =============================================================================

use std::fmt;
use url::Url;

// A normalized absolute URL identifying one fetchable resource.
//
// Two identities that compare equal are the same resource; the crawler
// guarantees each distinct identity is fetched at most once per run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentity(Url);

impl ResourceIdentity {
    // Parses an absolute URL string into a normalized identity.
    //
    // Returns Err for anything the url crate cannot parse (no scheme,
    // bad characters, etc.) - the caller decides whether that is fatal.
    pub fn parse(input: &str) -> Result<Self, url::ParseError> {
        let mut url = Url::parse(input)?;
        // Fragments never change which document the server returns
        url.set_fragment(None);
        Ok(ResourceIdentity(url))
    }

    // Resolves a raw reference (possibly relative) against this identity.
    //
    // Parameters:
    //   href: the reference as it appeared in the document
    //
    // Returns: Some(identity) for a followable http/https resource,
    //          None for anything we should not try to fetch
    //
    // Examples (base = "https://example.com/dir/page"):
    //   "other"            -> Some("https://example.com/dir/other")
    //   "/abs"             -> Some("https://example.com/abs")
    //   "https://a.test/x" -> Some("https://a.test/x")
    //   "mailto:x@y.test"  -> None
    //   "#section"         -> None
    pub fn resolve(&self, href: &str) -> Option<ResourceIdentity> {
        // Skip anchors and special protocols - these are not pages
        if href.starts_with('#')
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("javascript:")
        {
            return None;
        }

        // join() handles both relative and absolute references:
        // a relative href is resolved against the base (like a browser),
        // an absolute href replaces it entirely
        let mut resolved = self.0.join(href).ok()?;

        // Only HTTP/HTTPS resources are fetchable by this tool
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return None;
        }

        resolved.set_fragment(None);
        Some(ResourceIdentity(resolved))
    }

    // The host part of the identity (e.g. "example.com").
    //
    // Every http/https URL has a host, so this is only None for
    // exotic URLs that never make it past resolve().
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    // The explicit port, if the URL carries one (default ports are
    // stripped during normalization, so "https://h.test:443" has no port).
    pub fn port(&self) -> Option<u16> {
        self.0.port()
    }

    // The path component, always starting with "/".
    pub fn path(&self) -> &str {
        self.0.path()
    }

    // The full normalized URL as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

// Display lets us use identities directly in format strings and logs
impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is the newtype pattern?
//    - Wrapping an existing type (Url) in a one-field struct
//    - Lets us expose only the operations that make sense for our program
//    - Costs nothing at runtime (it compiles away)
//
// 2. Why derive Eq and Hash?
//    - The crawler keeps identities in a HashSet to deduplicate them
//    - HashSet needs to hash items and compare them for equality
//    - Url already implements both, so deriving just forwards to it
//
// 3. What does .ok()? do?
//    - .ok() converts Result<T, E> into Option<T> (dropping the error)
//    - ? then returns None early if there was no value
//    - Handy when the caller only cares about "worked or not"
//
// 4. Why strip fragments?
//    - "page#intro" and "page#usage" are the same HTTP resource
//    - Keeping fragments would make the crawler fetch pages twice
// -----------------------------------------------------------------------------
