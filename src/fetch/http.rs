// src/fetch/http.rs
// =============================================================================
// This module is the real, reqwest-backed fetcher.
//
// Key functionality:
// - One GET request per resource, with a 10 second timeout
// - Attaches an identifying X-Requested-By header to every request
//   (some management APIs refuse requests without one)
// - Attaches HTTP basic authentication when credentials were supplied
// - Classifies what came back: transport failure, bad status, or a body
//   that does not decode as its declared content type
//
// Rust concepts:
// - async/await: For network I/O without blocking the thread
// - Trait implementation: HttpFetcher is the production Fetch impl
// - Pattern matching: To turn reqwest errors into our own categories
// =============================================================================

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::crawl::Credentials;
use crate::extract::Document;
use crate::identity::ResourceIdentity;

use super::{Fetch, FetchOutcome};

// The marker every request carries, so server logs can tell us apart
const CLIENT_MARKER: &str = "site-mirror";

// Fetches resources over HTTP with optional basic authentication
pub struct HttpFetcher {
    client: Client,
    credentials: Option<Credentials>,
}

impl HttpFetcher {
    // Builds the fetcher and its underlying HTTP client.
    //
    // The client is created once and reused for every request
    // (connection pooling makes repeated fetches to one host cheap).
    pub fn new(credentials: Option<Credentials>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10)) // 10 second timeout per request
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .user_agent(concat!("site-mirror/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(HttpFetcher {
            client,
            credentials,
        })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    // Issues exactly one request and classifies the result.
    //
    // No retries happen here: a failed node is reported as failed and
    // the traversal decides what that means for the rest of the run.
    async fn fetch(&self, identity: &ResourceIdentity) -> FetchOutcome {
        let mut request = self
            .client
            .get(identity.as_str())
            .header("X-Requested-By", CLIENT_MARKER);

        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        // Layer 1: did the request produce a response at all?
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return categorize_error(e),
        };

        // Layer 2: did the server accept it?
        let status = response.status();
        if !status.is_success() {
            return FetchOutcome::HttpFailure {
                status: status.as_u16(),
            };
        }

        // Grab the declared content type before consuming the body
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        // Reading the body can still fail mid-stream (e.g. a timeout)
        let raw = match response.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(e) => return categorize_error(e),
        };

        // Layer 3: does the body decode as what the server claims it is?
        match Document::decode(&content_type, &raw) {
            Ok(document) => FetchOutcome::Success {
                content_type,
                raw,
                document,
            },
            Err(cause) => FetchOutcome::ParseFailure {
                content_type,
                cause,
                raw,
            },
        }
    }
}

// Turns a reqwest error into a classified transport failure
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - Connection refused / host unreachable
// - Too many redirects
fn categorize_error(error: reqwest::Error) -> FetchOutcome {
    // Convert the error to a string once to avoid lifetime issues
    let error_string = error.to_string();

    let cause = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            format!("connection failed: {}", error_string)
        }
    } else {
        error_string
    };

    FetchOutcome::NetworkFailure { cause }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_builds_without_credentials() {
        assert!(HttpFetcher::new(None).is_ok());
    }

    #[test]
    fn test_fetcher_builds_with_credentials() {
        let credentials = Credentials {
            username: "admin".to_string(),
            password: "secret".to_string(),
        };
        assert!(HttpFetcher::new(Some(credentials)).is_ok());
    }
}
