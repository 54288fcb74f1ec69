//! Core types for recorded edit actions.

/// The kind of edit an `Action` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    /// `content` was inserted at `position`.
    Insert,
    /// `content` was removed starting at `position`.
    Delete,
}

/// A single invertible edit.
///
/// Replaying an `Insert` reproduces the mutation that created it; the
/// inverse of `Insert(pos, s)` is `Delete(pos, s)` and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    /// Byte offset where the edit occurred.
    pub position: usize,
    /// Exact bytes inserted or removed.
    pub content: Vec<u8>,
}

impl Action {
    /// Creates an insert action.
    pub fn insert(position: usize, content: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: ActionKind::Insert,
            position,
            content: content.into(),
        }
    }

    /// Creates a delete action.
    pub fn delete(position: usize, content: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: ActionKind::Delete,
            position,
            content: content.into(),
        }
    }

    /// Returns the action that undoes this one.
    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            ActionKind::Insert => ActionKind::Delete,
            ActionKind::Delete => ActionKind::Insert,
        };
        Self {
            kind,
            position: self.position,
            content: self.content.clone(),
        }
    }

    /// End of the affected range, `position + content.len()`.
    pub fn end(&self) -> usize {
        self.position + self.content.len()
    }
}
