// src/store/mod.rs
// =============================================================================
// This module persists fetched resources to disk.
//
// Submodules:
// - path: maps a resource identity to its deterministic mirror path
// - writer: creates directories and writes the bytes
//
// The mapping from identity to path is a pure function: mirroring the
// same URL twice (even across runs) lands on the same file, which makes
// re-crawls idempotent. Existing files are overwritten without warning.
// =============================================================================

mod path;
mod writer;

pub use path::mirror_path;
pub use writer::ArtifactWriter;
