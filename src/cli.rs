// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// One behavior worth calling out: giving --username without --password
// makes the tool prompt for the password interactively, without echoing
// the keystrokes - passwords on the command line end up in shell
// history, so the prompt is the safer route.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Option<T>: Arguments the user may or may not supply
// =============================================================================

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::crawl::Credentials;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-mirror",
    version = "0.1.0",
    about = "Mirror a website or JSON API into local files by bounded crawling",
    long_about = "site-mirror starts from a seed URL, follows outbound links up to a depth limit, \
                  and writes every fetched resource to a local path mirroring its location. \
                  By default it stays on the seed's host."
)]
pub struct Cli {
    /// Seed URL to start from (https:// is assumed when no scheme is given)
    ///
    /// This is a positional argument (required, no flag needed)
    pub seed_url: String,

    /// Username for HTTP basic authentication
    #[arg(long)]
    pub username: Option<String>,

    /// Password for HTTP basic authentication
    ///
    /// When --username is given without --password, the password is
    /// prompted for interactively (without echo)
    #[arg(long)]
    pub password: Option<String>,

    /// Directory the mirror is written under
    ///
    /// #[arg(long, default_value = ".")] makes the current directory the default
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Maximum crawl depth (1 = just the seed page)
    ///
    /// Depth 2 = seed page + every page it links to
    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    /// Follow links to other hosts too (default: stay on the seed's host)
    #[arg(long)]
    pub all_domains: bool,

    /// Output the crawl summary in JSON format instead of a table
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    // Resolves the credentials for this run.
    //
    // Returns:
    //   Ok(None)        - no username given, crawl anonymously
    //   Ok(Some(creds)) - username plus supplied or prompted password
    //   Err             - the interactive prompt failed (e.g. no TTY)
    pub fn credentials(&self) -> Result<Option<Credentials>> {
        let username = match &self.username {
            Some(username) => username.clone(),
            None => return Ok(None),
        };

        let password = match &self.password {
            Some(password) => password.clone(),
            // Prompt without echo so the password never shows on screen
            None => dialoguer::Password::new()
                .with_prompt(format!("Password for {}", username))
                .allow_empty_password(true)
                .interact()?,
        };

        Ok(Some(Credentials { username, password }))
    }
}
