//! Content loaders for reading game data from files.
//!
//! Every loader returns [`LoadResult`]; file and parse failures carry the
//! offending path in their context.

pub mod config;

pub use config::{ConfigLoader, ContentBundle};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
