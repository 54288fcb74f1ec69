//! Error taxonomy for rope operations and file I/O.
use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by `TextRope` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RopeError {
    /// An index or split point outside the rope.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },
    /// A `(start, end)` pair with `start > end` or `end > len`.
    #[error("invalid range [{start}, {end}) for length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
}

/// A failed load or save. Only ever surfaced to the user as a status message.
#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct IoFailure {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}
