// src/log.rs
// =============================================================================
// This module is the crawl's diagnostic log.
//
// Two append-only files live under the output root:
// - success.log: one INFO line per notable event (fetch started, file saved)
// - error.log:   one ERROR line per node-level failure
//
// Each line is "timestamp - LEVEL - message". The log is handed to the
// engine as a plain value at construction time - there is no global
// logger - which keeps every component honest about where its
// diagnostics go.
//
// A log that cannot be opened or written degrades to doing nothing:
// diagnostics are never worth killing the crawl over.
//
// Rust concepts:
// - OpenOptions: opening files in append mode
// - Mutex: interior mutability so &self methods can write to the files
// - let _ =: explicitly discarding a Result we choose not to act on
// =============================================================================

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;

// An append-only, line-oriented diagnostic log
pub struct CrawlLog {
    success: Option<Mutex<File>>,
    error: Option<Mutex<File>>,
}

impl CrawlLog {
    // Opens (or creates) the log files under the given directory.
    //
    // A file that cannot be opened leaves that sink disabled rather
    // than failing the run.
    pub fn open(dir: &Path) -> Self {
        CrawlLog {
            success: append_handle(&dir.join("success.log")),
            error: append_handle(&dir.join("error.log")),
        }
    }

    // Records a normal-operation event
    pub fn info(&self, message: &str) {
        append_line(&self.success, "INFO", message);
    }

    // Records a failure event
    pub fn error(&self, message: &str) {
        append_line(&self.error, "ERROR", message);
    }
}

fn append_handle(path: &Path) -> Option<Mutex<File>> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()
        .map(Mutex::new)
}

fn append_line(sink: &Option<Mutex<File>>, level: &str, message: &str) {
    if let Some(file) = sink {
        if let Ok(mut file) = file.lock() {
            // A failed write must never take the crawl down with it
            let _ = writeln!(
                file,
                "{} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                level,
                message
            );
        }
    }
}
