use std::path::PathBuf;
use thiserror::Error;

use crate::filter::TargetType;

/// The main error type for cocoedit operations.
#[derive(Debug, Error)]
pub enum CocoEditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write COCO JSON to {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing keys {keys:?} in {target} with ID: {id}")]
    MissingKeys {
        target: TargetType,
        keys: Vec<String>,
        id: String,
    },

    #[error("Missing required collection '{0}'")]
    MissingCollection(&'static str),

    #[error("Malformed COCO document: {0}")]
    Malformed(String),

    #[error("Invalid {target} at index {index}: {source}")]
    InvalidRecord {
        target: TargetType,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Integrity check failed with {error_count} error(s) and {warning_count} warning(s)")]
    IntegrityFailed {
        error_count: usize,
        warning_count: usize,
    },
}
