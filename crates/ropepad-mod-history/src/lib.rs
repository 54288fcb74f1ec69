//! Undo/redo history for the editing session.
//!
//! Provides the invertible `Action` record and a `History` that keeps the
//! undo and redo stacks in chronological order. History lives in memory
//! only and is dropped with the session.
pub mod action;
pub mod config;
pub mod manager;

pub use action::{Action, ActionKind};
pub use config::HistoryConfig;
pub use manager::History;
