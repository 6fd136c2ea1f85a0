//! Build error types.
//!
//! `MalformedInput` and `MissingResource` are reported and skipped;
//! `OutputWrite` fails only the file being written.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("malformed input {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },

    #[error("{} not found", .0.display())]
    MissingResource(PathBuf),

    #[error("failed to write {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl BuildError {
    /// Whether the run should log and carry on rather than report a failure.
    pub const fn is_skip(&self) -> bool {
        matches!(self, Self::MalformedInput { .. } | Self::MissingResource(_))
    }
}
