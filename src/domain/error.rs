//! Error types for the Memories plugin.
//!
//! Two families live here. [`TransportError`] is the only failure that crosses
//! the network boundary: every HTTP, host-command or decoding problem ends up
//! as one of its variants. [`MemoriesError`] is the crate-wide error for
//! everything else (filesystem I/O, themes) and wraps
//! `TransportError` so `?` works across layers.

use thiserror::Error;

/// Failure of a single call against the memories backend.
///
/// Produced by the transport layer and consumed by the dispatch layer, which
/// logs it and leaves the store untouched.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The host command (`curl`) did not complete successfully.
    ///
    /// `exit_code` is `None` when the command was killed or never started.
    #[error("request command failed (exit code {exit_code:?}): {stderr}")]
    Command {
        exit_code: Option<i32>,
        stderr: String,
    },

    /// The backend answered with a non-success HTTP status.
    #[error("backend responded with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The host output could not be split into a body and a status line.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The response body was not the JSON the call expects.
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

/// The main error type for Memories plugin operations.
#[derive(Debug, Error)]
pub enum MemoriesError {
    /// A backend call failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A theme file is not a valid theme.
    #[error("Theme error: {0}")]
    Theme(String),
}

/// A specialized `Result` type for Memories operations.
pub type Result<T> = std::result::Result<T, MemoriesError>;
