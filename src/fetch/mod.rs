// src/fetch/mod.rs
// =============================================================================
// This module retrieves resources over HTTP.
//
// Submodules:
// - http: the real reqwest-backed fetcher
//
// This file (mod.rs) defines the contract between the traversal and the
// network: the Fetch trait and the FetchOutcome it produces. The engine
// only ever talks to the trait, which is what lets tests run a crawl
// against canned responses instead of a live server.
//
// Rust concepts:
// - Traits: An interface the engine depends on instead of a concrete type
// - async-trait: Allows async functions inside trait definitions
// - Enums with data: FetchOutcome carries different fields per variant
// =============================================================================

mod http;

// Re-export the production fetcher
pub use http::HttpFetcher;

use crate::extract::Document;
use crate::identity::ResourceIdentity;
use async_trait::async_trait;

// Everything one fetch attempt can come back as
//
// The variants separate the three distinct failure layers:
// the transport (no response at all), the HTTP status (server said no),
// and the body (server said yes but sent something undecodable).
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// 2xx response whose body decoded cleanly for its content type
    Success {
        content_type: String,
        raw: Vec<u8>,
        document: Document,
    },
    /// Server answered with a non-2xx status
    HttpFailure { status: u16 },
    /// The request itself failed (DNS, connection refused, timeout)
    NetworkFailure { cause: String },
    /// 2xx response whose body could not be decoded; the raw bytes are
    /// kept so the caller can still persist or inspect them
    ParseFailure {
        content_type: String,
        cause: String,
        raw: Vec<u8>,
    },
}

// The single operation the traversal needs from the network: one
// attempt per call, no internal retries, every failure classified
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, identity: &ResourceIdentity) -> FetchOutcome;
}
