// src/crawl/mod.rs
// =============================================================================
// This module owns the crawl itself.
//
// Submodules:
// - engine: the worklist-driven traversal (fetch -> extract -> persist -> enqueue)
//
// This file (mod.rs) holds the data the traversal runs on:
// - CrawlConfig: everything a single run needs, fixed up front
// - Credentials: optional username/password for basic authentication
// - CrawlSummary: what happened, reported back to main
// - FailureRecord / FailureKind: one entry per node that went wrong
//
// Rust concepts:
// - Modules: Organize code into namespaces
// - pub use: Re-export items to simplify imports for users of this module
// - Enums with data: FailureKind carries different fields per variant
// =============================================================================

mod engine;

// Re-export the traversal engine so callers write `crawl::CrawlEngine`
pub use engine::CrawlEngine;

use crate::identity::ResourceIdentity;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// Username and password for HTTP basic authentication
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

// Everything one crawl run needs, assembled once at startup and
// immutable afterwards
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Where the crawl starts (depth 1)
    pub seed: ResourceIdentity,
    /// Optional basic-auth credentials, attached to every request
    pub credentials: Option<Credentials>,
    /// How many hops from the seed we follow (1 = just the seed page)
    pub max_depth: usize,
    /// When true, references leaving the seed's host are never followed
    pub same_host_only: bool,
    /// Directory the mirrored files are written under
    pub output_root: PathBuf,
}

impl CrawlConfig {
    // Builds and validates a config from raw invocation inputs.
    //
    // The seed gets "https://" prepended when no scheme was given, so
    // users can type plain hostnames. A seed that still fails to parse
    // (or has no host) is an invocation error - nothing is fetched.
    pub fn new(
        seed: &str,
        credentials: Option<Credentials>,
        max_depth: usize,
        same_host_only: bool,
        output_root: PathBuf,
    ) -> Result<Self> {
        let seed_with_scheme = ensure_scheme(seed);
        let seed = ResourceIdentity::parse(&seed_with_scheme)
            .map_err(|e| anyhow!("Invalid seed URL '{}': {}", seed, e))?;

        if seed.host().is_none() {
            return Err(anyhow!("Seed URL '{}' has no host", seed));
        }

        Ok(CrawlConfig {
            seed,
            credentials,
            max_depth,
            same_host_only,
            output_root,
        })
    }
}

// Prepends "https://" when the input has no scheme at all
fn ensure_scheme(raw: &str) -> String {
    if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

// What a finished crawl reports back
//
// #[derive(Serialize)] lets main print this as JSON with --json
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CrawlSummary {
    /// Resources retrieved with a 2xx response
    pub fetched: usize,
    /// Files written under the output root
    pub saved: usize,
    /// One record per node-level failure (the crawl itself kept going)
    pub failures: Vec<FailureRecord>,
}

// One node-level failure, kept for the final report
#[derive(Debug, Serialize, Deserialize)]
pub struct FailureRecord {
    /// The resource the failure happened on
    pub url: String,
    /// What kind of failure it was
    #[serde(flatten)] // merges the FailureKind fields into this record
    pub kind: FailureKind,
}

// The ways a single node can fail without stopping the crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// Server answered with a non-2xx status
    Http { status: u16 },
    /// The request never produced a response (DNS, refused, timeout)
    Network { cause: String },
    /// 2xx response whose body was not valid for its content type
    Decode { cause: String },
    /// The artifact could not be written to disk
    Persistence { cause: String },
}

// Display is what the table output and the diagnostic log show
impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Http { status } => write!(f, "HTTP {}", status),
            FailureKind::Network { cause } => write!(f, "network error: {}", cause),
            FailureKind::Decode { cause } => write!(f, "decode error: {}", cause),
            FailureKind::Persistence { cause } => write!(f, "write error: {}", cause),
        }
    }
}
