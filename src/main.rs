// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the crawl configuration (and prompt for a password if needed)
// 3. Wire up the fetcher, writer and log, then run the crawl
// 4. Print the summary and exit
//
// Exit codes:
//   0 = the crawl ran to completion (even if individual pages failed)
//   2 = invocation error (bad seed URL, unusable output directory, ...)
//
// Per-node failures are part of normal operation for a crawler - a dead
// link on someone else's site is not our error - so only problems with
// the invocation itself make the exit code nonzero.
//
// Rust concepts:
// - async/await: the crawl suspends at each network call
// - Result<T, E>: For error handling (T = success type, E = error type)
// - The ? operator: propagate errors up to main's error handler
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod crawl;    // src/crawl/ - traversal engine and run configuration
mod extract;  // src/extract/ - link extraction from HTML and JSON bodies
mod fetch;    // src/fetch/ - authenticated HTTP fetching
mod identity; // src/identity.rs - normalized resource identities
mod log;      // src/log.rs - file-backed diagnostic log
mod store;    // src/store/ - mirror paths and artifact writing

use clap::Parser; // Parser trait enables the parse() method

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::{Context, Result};

use cli::Cli;
use crawl::{CrawlConfig, CrawlEngine, CrawlSummary};
use fetch::HttpFetcher;
use log::CrawlLog;
use store::ArtifactWriter;

// The #[tokio::main] attribute transforms our async main into a real main
// function. It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // An invocation-level error: print it and exit with code 2
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// The main application logic
// Returns:
//   Ok(0) = crawl completed
//   Err   = invocation error (reported by main as exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Prompting happens before anything else so a mistyped password
    // doesn't cost the user a half-finished crawl
    let credentials = cli.credentials()?;

    let config = CrawlConfig::new(
        &cli.seed_url,
        credentials,
        cli.max_depth,
        !cli.all_domains,
        cli.output_dir.clone(),
    )?;

    // Invocation-level check: the output root must exist and be usable
    // before the first fetch happens
    std::fs::create_dir_all(&config.output_root).with_context(|| {
        format!(
            "Cannot create output directory {}",
            config.output_root.display()
        )
    })?;

    println!("🔍 Mirroring: {}", config.seed);
    println!("📊 Max crawl depth: {}", config.max_depth);
    if config.same_host_only {
        println!("🏠 Staying on host: {}", config.seed.host().unwrap_or("?"));
    }

    // Wire up the collaborators and hand them to the engine
    let fetcher = HttpFetcher::new(config.credentials.clone())?;
    let writer = ArtifactWriter::new(&config.output_root);
    let log = CrawlLog::open(&config.output_root);

    let summary = CrawlEngine::new(&config, &fetcher, &writer, &log)
        .crawl()
        .await;

    print_summary(&summary, cli.json)?;

    // Per-node failures are already in the summary and the log;
    // they never turn into a nonzero exit
    Ok(0)
}

// Prints the summary either as a table or JSON
fn print_summary(summary: &CrawlSummary, json: bool) -> Result<()> {
    if json {
        // Serialize the summary to JSON and print
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        print_table(summary);
    }
    Ok(())
}

// Prints the summary as a human-readable report in the terminal
fn print_table(summary: &CrawlSummary) {
    if !summary.failures.is_empty() {
        println!();
        println!("{:<60} {:<30}", "URL", "FAILURE");
        println!("{}", "=".repeat(90));

        for failure in &summary.failures {
            // Truncate the URL if too long for display
            let url_display = if failure.url.len() > 57 {
                format!("{}...", &failure.url[..57])
            } else {
                failure.url.clone()
            };

            println!("{:<60} {:<30}", url_display, failure.kind.to_string());
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   ✅ Fetched: {}", summary.fetched);
    println!("   💾 Saved: {}", summary.saved);
    println!("   ❌ Failed: {}", summary.failures.len());
}
