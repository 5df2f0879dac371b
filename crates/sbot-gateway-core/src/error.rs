//! Error types for node access and invitation issuance.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a [`Node`](crate::Node) or a pull source.
#[derive(Error, Debug)]
pub enum Error {
    /// The node command ran but exited unsuccessfully.
    #[error("`{command}` failed ({status}): {stderr}")]
    Command {
        /// The command line that was run (without the binary path).
        command: String,
        /// Exit status as reported by the OS.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },

    /// The node has no record of the requested key.
    #[error("not found: {0}")]
    NotFound(String),

    /// A source ended without producing the value it was read for.
    #[error("source ended without producing a value")]
    Empty,

    /// The consumer aborted the stream.
    #[error("aborted: {0}")]
    Aborted(String),

    /// The node produced output we could not parse.
    #[error("invalid node response: {0}")]
    Json(#[from] serde_json::Error),

    /// The node command could not be spawned.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
