//! Core editing engine: a persistent byte rope and the session state
//! machine built on top of it.
//!
//! Everything here is addressed through logical byte offsets. Terminal
//! handling and drawing live in `ropepad-tui`.

pub mod error;
pub mod history;
pub mod keys;
pub mod prompt;
pub mod rope;
pub mod search;
pub mod session;

pub use error::{IoFailure, RopeError};
pub use keys::{read_key, ByteSource, Direction, Key};
pub use rope::TextRope;
pub use session::{EditSession, Flow, Interaction, SessionOptions, Snapshot};
