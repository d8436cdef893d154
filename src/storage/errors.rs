use std::io;

use thiserror::Error;

/// Errors raised by the object-store capability and its S3 client.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("environment variable {0} is not set")]
    MissingEnvVar(String),

    #[error("invalid object store endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("object store returned status {status} for {context}")]
    UnexpectedStatus { status: u16, context: String },

    #[error("malformed listing response: {0}")]
    MalformedListing(String),

    #[error("remote store not configured")]
    NotConfigured,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
