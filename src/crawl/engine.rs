// src/crawl/engine.rs
// =============================================================================
// This module implements the traversal that drives a mirror run.
//
// How it works:
// 1. Start with the seed URL in a worklist, marked as visited
// 2. Pop an entry, fetch the resource
// 3. Save the raw bytes to a file mirroring the URL's location
// 4. Extract references from the body and resolve them to identities
// 5. Enqueue each identity that is in scope, within depth, and unseen
// 6. Repeat until the worklist is empty
//
// Failure isolation:
// - A node that cannot be fetched, decoded or saved is recorded and
//   skipped; its siblings (and the rest of the crawl) are unaffected
//
// Termination:
// - The visited set only ever grows, and nothing is enqueued twice
// - Depth is bounded, so even a self-referential site finishes
//
// Rust concepts:
// - HashSet: To track visited identities (O(1) lookup)
// - VecDeque: Double-ended queue holding the crawl worklist
// - Generics: The engine works with any Fetch implementation
// =============================================================================

use std::collections::{HashSet, VecDeque};

use crate::crawl::{CrawlConfig, CrawlSummary, FailureKind, FailureRecord};
use crate::extract::{self, Document};
use crate::fetch::{Fetch, FetchOutcome};
use crate::identity::ResourceIdentity;
use crate::log::CrawlLog;
use crate::store::ArtifactWriter;

// One entry in the crawl worklist
#[derive(Debug)]
struct FrontierEntry {
    identity: ResourceIdentity,
    depth: usize, // How many hops from the seed (seed = 1)
}

// Drives one crawl run from seed to completion
//
// The engine borrows its collaborators instead of owning them:
// the fetcher does the network I/O, the writer does the disk I/O,
// and the log records what happened. All three are supplied by the
// caller, which is what lets tests swap the fetcher for a stub.
pub struct CrawlEngine<'a, F: Fetch> {
    config: &'a CrawlConfig,
    fetcher: &'a F,
    writer: &'a ArtifactWriter,
    log: &'a CrawlLog,
}

impl<'a, F: Fetch> CrawlEngine<'a, F> {
    pub fn new(
        config: &'a CrawlConfig,
        fetcher: &'a F,
        writer: &'a ArtifactWriter,
        log: &'a CrawlLog,
    ) -> Self {
        CrawlEngine {
            config,
            fetcher,
            writer,
            log,
        }
    }

    // Runs the crawl to completion and reports what happened.
    //
    // Node-level failures are collected in the summary, never returned
    // as errors - by the time we are here, the invocation was valid.
    pub async fn crawl(&self) -> CrawlSummary {
        let mut visited: HashSet<ResourceIdentity> = HashSet::new();
        let mut frontier: VecDeque<FrontierEntry> = VecDeque::new();
        let mut summary = CrawlSummary::default();

        // The seed enters the visited set before anything can rediscover it
        visited.insert(self.config.seed.clone());
        frontier.push_back(FrontierEntry {
            identity: self.config.seed.clone(),
            depth: 1,
        });

        while let Some(entry) = frontier.pop_front() {
            // Depth guard: nothing beyond max_depth is ever fetched
            // (also covers a max_depth of 0, where even the seed is skipped)
            if entry.depth > self.config.max_depth {
                continue;
            }
            self.visit(entry, &mut visited, &mut frontier, &mut summary)
                .await;
        }

        summary
    }

    // Processes a single worklist entry: fetch, persist, enqueue children
    async fn visit(
        &self,
        entry: FrontierEntry,
        visited: &mut HashSet<ResourceIdentity>,
        frontier: &mut VecDeque<FrontierEntry>,
        summary: &mut CrawlSummary,
    ) {
        println!("  Fetching [depth {}]: {}", entry.depth, entry.identity);
        self.log
            .info(&format!("fetching [depth {}] {}", entry.depth, entry.identity));

        match self.fetcher.fetch(&entry.identity).await {
            FetchOutcome::Success {
                content_type,
                raw,
                document,
            } => {
                summary.fetched += 1;
                self.persist(&entry.identity, &content_type, &raw, summary);

                // Children only get enqueued while there is depth left;
                // a child would live at entry.depth + 1
                if entry.depth < self.config.max_depth {
                    self.enqueue_children(&entry, &document, visited, frontier);
                }
            }
            FetchOutcome::ParseFailure {
                content_type,
                cause,
                raw,
            } => {
                // The server did answer, so the bytes are kept verbatim;
                // the node just contributes no links
                summary.fetched += 1;
                self.record_failure(&entry.identity, FailureKind::Decode { cause }, summary);
                self.persist(&entry.identity, &content_type, &raw, summary);
            }
            FetchOutcome::HttpFailure { status } => {
                self.record_failure(&entry.identity, FailureKind::Http { status }, summary);
            }
            FetchOutcome::NetworkFailure { cause } => {
                self.record_failure(&entry.identity, FailureKind::Network { cause }, summary);
            }
        }
    }

    // Writes one artifact and accounts for the result
    fn persist(
        &self,
        identity: &ResourceIdentity,
        content_type: &str,
        raw: &[u8],
        summary: &mut CrawlSummary,
    ) {
        match self.writer.write(identity, content_type, raw) {
            Ok(path) => {
                summary.saved += 1;
                self.log
                    .info(&format!("saved {} -> {}", identity, path.display()));
            }
            Err(e) => {
                // A failed write only affects this node
                self.record_failure(
                    identity,
                    FailureKind::Persistence {
                        cause: e.to_string(),
                    },
                    summary,
                );
            }
        }
    }

    // Resolves, filters and enqueues the references found on a page
    fn enqueue_children(
        &self,
        entry: &FrontierEntry,
        document: &Document,
        visited: &mut HashSet<ResourceIdentity>,
        frontier: &mut VecDeque<FrontierEntry>,
    ) {
        for href in extract::extract_links(document) {
            // Resolve against the page the reference appeared on
            let next = match entry.identity.resolve(&href) {
                Some(next) => next,
                None => continue, // unparseable or non-http reference
            };

            // Scope filter: stay on the seed's host unless told otherwise
            if self.config.same_host_only && next.host() != self.config.seed.host() {
                continue;
            }

            // Dedup filter: anything already visited (or already queued,
            // since queued identities are marked visited below) is skipped
            if visited.contains(&next) {
                continue;
            }

            // Marking at enqueue time guarantees a sibling that discovers
            // the same identity later in this pass cannot queue it twice
            visited.insert(next.clone());
            frontier.push_back(FrontierEntry {
                identity: next,
                depth: entry.depth + 1,
            });
        }
    }

    // Records a node-level failure: one log line, one console warning,
    // one summary entry - and the crawl moves on
    fn record_failure(
        &self,
        identity: &ResourceIdentity,
        kind: FailureKind,
        summary: &mut CrawlSummary,
    ) {
        eprintln!("  Warning: failed on {}: {}", identity, kind);
        self.log.error(&format!("{}: {}", identity, kind));
        summary.failures.push(FailureRecord {
            url: identity.to_string(),
            kind,
        });
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a worklist instead of recursion?
//    - A site with deep link chains would grow the call stack with it
//    - A VecDeque keeps the pending work on the heap instead
//    - The depth lives inside each entry, so nothing depends on stack depth
//
// 2. Why insert into `visited` when enqueueing, not when popping?
//    - Two pages at the same depth can both link to a third page
//    - If we only checked at pop time, that page would sit in the queue twice
//    - Inserting at enqueue time makes "at most one fetch per identity" exact
//
// 3. What is while let?
//    - Loop while pattern matching succeeds
//    - while let Some(entry) = frontier.pop_front() means:
//      "while there's an entry in the queue, bind it to 'entry' and loop"
//    - Stops when pop_front() returns None (empty queue)
//
// 4. Why does the engine take &F instead of a concrete fetcher?
//    - F: Fetch means "anything implementing the Fetch trait"
//    - Production passes the real HTTP fetcher
//    - Tests pass a stub with canned responses - no network needed
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchOutcome;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // A fetcher with canned responses, recording every identity it is
    // asked for. Unknown identities answer 404.
    struct StubFetcher {
        pages: HashMap<String, FetchOutcome>,
        calls: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn new(pages: Vec<(&str, FetchOutcome)>) -> Self {
            StubFetcher {
                pages: pages
                    .into_iter()
                    .map(|(url, outcome)| (url.to_string(), outcome))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch(&self, identity: &ResourceIdentity) -> FetchOutcome {
            self.calls.lock().unwrap().push(identity.to_string());
            match self.pages.get(identity.as_str()) {
                Some(outcome) => outcome.clone(),
                None => FetchOutcome::HttpFailure { status: 404 },
            }
        }
    }

    // Builds a successful HTML response whose body contains the given anchors
    fn html_page(hrefs: &[&str]) -> FetchOutcome {
        let anchors: String = hrefs
            .iter()
            .map(|href| format!("<a href=\"{}\">link</a>", href))
            .collect();
        let body = format!("<html><body>{}</body></html>", anchors);
        FetchOutcome::Success {
            content_type: "text/html".to_string(),
            raw: body.clone().into_bytes(),
            document: Document::Html(body),
        }
    }

    // Builds a successful JSON response with a links array
    fn json_page(hrefs: &[&str]) -> FetchOutcome {
        let value = json!({
            "links": hrefs.iter().map(|href| json!({ "href": href })).collect::<Vec<_>>()
        });
        FetchOutcome::Success {
            content_type: "application/json".to_string(),
            raw: value.to_string().into_bytes(),
            document: Document::Json(value.clone()),
        }
    }

    fn config(seed: &str, max_depth: usize, same_host_only: bool, root: PathBuf) -> CrawlConfig {
        CrawlConfig::new(seed, None, max_depth, same_host_only, root).unwrap()
    }

    async fn run(
        config: &CrawlConfig,
        fetcher: &StubFetcher,
    ) -> CrawlSummary {
        let writer = ArtifactWriter::new(&config.output_root);
        let log = CrawlLog::open(&config.output_root);
        CrawlEngine::new(config, fetcher, &writer, &log)
            .crawl()
            .await
    }

    #[tokio::test]
    async fn test_self_loop_and_off_domain_links_are_suppressed() {
        // Seed links to itself, to an off-domain page, and to one
        // on-domain child; only seed + child should be fetched and saved
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![
            (
                "https://h.test/",
                html_page(&["https://h.test/", "https://other.test/x", "/child"]),
            ),
            ("https://h.test/child", html_page(&[])),
        ]);
        let config = config("https://h.test/", 2, true, dir.path().to_path_buf());

        let summary = run(&config, &fetcher).await;

        assert_eq!(
            fetcher.calls(),
            vec!["https://h.test/", "https://h.test/child"]
        );
        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.saved, 2);
        assert!(summary.failures.is_empty());
        assert!(dir.path().join("h.test").join("index.html").exists());
        assert!(dir.path().join("h.test").join("child").exists());
    }

    #[tokio::test]
    async fn test_broken_child_does_not_stop_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![
            ("https://h.test/", html_page(&["/missing", "/good"])),
            ("https://h.test/good", html_page(&[])),
            // "/missing" is absent, so the stub answers 404
        ]);
        let config = config("https://h.test/", 2, true, dir.path().to_path_buf());

        let summary = run(&config, &fetcher).await;

        assert_eq!(summary.fetched, 2);
        assert_eq!(summary.saved, 2);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].url, "https://h.test/missing");
        assert!(matches!(
            summary.failures[0].kind,
            FailureKind::Http { status: 404 }
        ));
        assert!(dir.path().join("h.test").join("good").exists());
    }

    #[tokio::test]
    async fn test_depth_limit_stops_expansion() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![
            ("https://h.test/", html_page(&["/b"])),
            ("https://h.test/b", html_page(&["/c"])),
            ("https://h.test/c", html_page(&[])),
        ]);
        let config = config("https://h.test/", 2, true, dir.path().to_path_buf());

        run(&config, &fetcher).await;

        // /c sits at depth 3, beyond the limit of 2
        assert_eq!(fetcher.calls(), vec!["https://h.test/", "https://h.test/b"]);
    }

    #[tokio::test]
    async fn test_max_depth_zero_fetches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![("https://h.test/", html_page(&[]))]);
        let config = config("https://h.test/", 0, true, dir.path().to_path_buf());

        let summary = run(&config, &fetcher).await;

        assert!(fetcher.calls().is_empty());
        assert_eq!(summary.fetched, 0);
    }

    #[tokio::test]
    async fn test_mutual_references_fetch_each_node_once() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![
            ("https://h.test/a", html_page(&["/b"])),
            ("https://h.test/b", html_page(&["/a"])),
        ]);
        let config = config("https://h.test/a", 5, true, dir.path().to_path_buf());

        run(&config, &fetcher).await;

        assert_eq!(fetcher.calls(), vec!["https://h.test/a", "https://h.test/b"]);
    }

    #[tokio::test]
    async fn test_shared_child_is_enqueued_once() {
        // Both /a and /b link to /shared; it must be fetched exactly once
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![
            ("https://h.test/", html_page(&["/a", "/b"])),
            ("https://h.test/a", html_page(&["/shared"])),
            ("https://h.test/b", html_page(&["/shared"])),
            ("https://h.test/shared", html_page(&[])),
        ]);
        let config = config("https://h.test/", 3, true, dir.path().to_path_buf());

        run(&config, &fetcher).await;

        let shared_fetches = fetcher
            .calls()
            .iter()
            .filter(|url| url.as_str() == "https://h.test/shared")
            .count();
        assert_eq!(shared_fetches, 1);
    }

    #[tokio::test]
    async fn test_json_links_are_followed() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![
            ("https://h.test/api/", json_page(&["a/b"])),
            ("https://h.test/api/a/b", json_page(&[])),
        ]);
        let config = config("https://h.test/api/", 2, true, dir.path().to_path_buf());

        let summary = run(&config, &fetcher).await;

        assert_eq!(
            fetcher.calls(),
            vec!["https://h.test/api/", "https://h.test/api/a/b"]
        );
        assert_eq!(summary.saved, 2);
        // Directory-like path gets the JSON default leaf, concrete path does not
        assert!(dir
            .path()
            .join("h.test")
            .join("api")
            .join("index.json")
            .exists());
        assert!(dir.path().join("h.test").join("api").join("a").join("b").exists());
    }

    #[tokio::test]
    async fn test_protocol_relative_reference_cannot_escape_scope() {
        // "//other.test/x" resolves to a different host even though it
        // looks like a relative path
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![(
            "https://h.test/",
            html_page(&["//other.test/x"]),
        )]);
        let config = config("https://h.test/", 2, true, dir.path().to_path_buf());

        run(&config, &fetcher).await;

        assert_eq!(fetcher.calls(), vec!["https://h.test/"]);
    }

    #[tokio::test]
    async fn test_scheme_change_on_same_host_stays_in_scope() {
        // Scope compares hosts only, so an http link on an https site
        // is still the same site
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![
            ("https://h.test/", html_page(&["http://h.test/alt"])),
            ("http://h.test/alt", html_page(&[])),
        ]);
        let config = config("https://h.test/", 2, true, dir.path().to_path_buf());

        run(&config, &fetcher).await;

        assert_eq!(fetcher.calls(), vec!["https://h.test/", "http://h.test/alt"]);
    }

    #[tokio::test]
    async fn test_all_domains_mode_follows_external_links() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![
            ("https://h.test/", html_page(&["https://other.test/x"])),
            ("https://other.test/x", html_page(&[])),
        ]);
        let config = config("https://h.test/", 2, false, dir.path().to_path_buf());

        run(&config, &fetcher).await;

        assert_eq!(
            fetcher.calls(),
            vec!["https://h.test/", "https://other.test/x"]
        );
        assert!(dir.path().join("other.test").join("x").exists());
    }

    #[tokio::test]
    async fn test_decode_failure_still_persists_the_body() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = StubFetcher::new(vec![(
            "https://h.test/broken.json",
            FetchOutcome::ParseFailure {
                content_type: "application/json".to_string(),
                cause: "invalid JSON body".to_string(),
                raw: b"{not json".to_vec(),
            },
        )]);
        let config = config(
            "https://h.test/broken.json",
            1,
            true,
            dir.path().to_path_buf(),
        );

        let summary = run(&config, &fetcher).await;

        assert_eq!(summary.saved, 1);
        assert_eq!(summary.failures.len(), 1);
        assert!(matches!(
            summary.failures[0].kind,
            FailureKind::Decode { .. }
        ));
        let saved = dir.path().join("h.test").join("broken.json");
        assert_eq!(std::fs::read(saved).unwrap(), b"{not json");
    }
}
