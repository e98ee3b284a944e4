// Store error types

use std::path::PathBuf;
use thiserror::Error;

use crate::model::{StudentId, ValidationErrors};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection could not be opened at startup
    #[error("failed to open collection {path}: {source}")]
    Connect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collection file exists but does not hold a valid document list
    #[error("collection {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write collection: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("student {0} not found")]
    NotFound(StudentId),

    #[error("invalid student: {0}")]
    Validation(#[from] ValidationErrors),
}
