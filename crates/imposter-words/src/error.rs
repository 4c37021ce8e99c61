//! Error types for the words layer.

use std::path::PathBuf;

/// Errors that can occur while loading categories or drawing words.
#[derive(Debug, thiserror::Error)]
pub enum WordsError {
    /// `draw` was called for a category id that was never registered.
    #[error("no word pool for category {0}")]
    PoolNotFound(String),

    /// The category is registered but has no words to draw from.
    #[error("category {0} has no words")]
    EmptyPool(String),

    /// Two categories in one catalog share the same id.
    #[error("duplicate category id in catalog: {0}")]
    DuplicateCategory(String),

    /// The catalog JSON doesn't match the `[{id,name,words}]` schema.
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
