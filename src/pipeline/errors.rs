use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by the relevance-output merge. Mid-write I/O is
/// handled inside the merge and reported as an unsuccessful run rather
/// than through this type.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid relevance input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(
        "header mismatch in {}: expected {expected:?}, found {found:?}",
        .file.display()
    )]
    HeaderMismatch {
        file: PathBuf,
        expected: String,
        found: String,
    },
}

/// Errors from writing or staging the train-info snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("remote staging requested but no store was provided")]
    MissingStore,

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum RunGuardError {
    #[error("another run owns the marker {}", .0.display())]
    AlreadyRunning(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
