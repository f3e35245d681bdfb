// src/store/writer.rs
// =============================================================================
// This module writes fetched bytes to their mirror path.
//
// Behavior:
// - Missing parent directories are created first (idempotent - an
//   existing directory is not an error)
// - The bytes are written verbatim, exactly as the server sent them
// - An existing file at the target path is overwritten silently
//   (last write wins, no versioning)
//
// Rust concepts:
// - std::fs: synchronous filesystem operations
// - anyhow::Context: attaching "what were we doing" to I/O errors
// =============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::identity::ResourceIdentity;

use super::path::mirror_path;

// Writes artifacts under a fixed output root
pub struct ArtifactWriter {
    output_root: PathBuf,
}

impl ArtifactWriter {
    pub fn new(output_root: impl AsRef<Path>) -> Self {
        ArtifactWriter {
            output_root: output_root.as_ref().to_path_buf(),
        }
    }

    // Persists one resource and returns the path it landed at.
    //
    // Failure here is a node-level event: the caller records it and
    // carries on with the rest of the crawl.
    pub fn write(
        &self,
        identity: &ResourceIdentity,
        content_type: &str,
        raw: &[u8],
    ) -> Result<PathBuf> {
        let path = mirror_path(&self.output_root, identity, content_type);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(&path, raw).with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(path)
    }
}
