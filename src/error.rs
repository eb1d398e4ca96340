//! Error types for prbridge library.

use std::io;
use thiserror::Error;

/// Result type alias for prbridge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting and reconciling.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A recognizer pattern failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Error during rendering (ADF, JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// A version string is not a dotted numeric version.
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    /// The issue carries more than one fixVersion.
    #[error("Issue has {0} fixVersions assigned, expected at most one")]
    AmbiguousFixVersion(usize),

    /// The release branch has no matching unreleased fixVersion.
    #[error("Release branch version {0} not found among unreleased fixVersions")]
    ReleaseVersionNotFound(String),

    /// No unreleased fixVersion qualifies.
    #[error("No unreleased fixVersion candidate: {0}")]
    NoFixVersionCandidate(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
