//! Editing session: the buffer, cursor and history of one open document.
//!
//! The cursor's byte offset is the primary position. Row and column are
//! derived from it after every edit, except during arrow navigation where
//! row and column lead and the offset is derived back (see `cursor`).
//! File I/O lives in the `io` submodule and interactive search in `search`.

mod cursor;
mod io;
mod search;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::history::{Action, ActionKind, History, HistoryConfig};
use crate::keys::Key;
use crate::rope::TextRope;

pub use io::{write_file, SAVE_PROMPT};
pub use search::SEARCH_PROMPT;

/// Depth above which the buffer is flattened and rebuilt.
pub const DEFAULT_REBALANCE_DEPTH: usize = 64;

/// Shown in place of a filename for unnamed buffers.
pub const NO_NAME: &str = "[No Name]";

/// Tunables for an [`EditSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub rebalance_depth: usize,
    pub history: HistoryConfig,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            rebalance_depth: DEFAULT_REBALANCE_DEPTH,
            history: HistoryConfig::default(),
        }
    }
}

/// Whether the event loop should keep running after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Read-only view of the session handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub lines: Vec<Vec<u8>>,
    /// 1-indexed.
    pub cursor_row: usize,
    /// 1-indexed.
    pub cursor_col: usize,
    pub filename: String,
    pub status: Option<String>,
}

/// The session's view of the user: line prompts and single keys.
///
/// The terminal frontend implements this on top of raw stdin; tests use
/// scripted implementations.
pub trait Interaction {
    /// Asks for a line of input. `None` means the user cancelled.
    fn prompt(&mut self, label: &str) -> Option<String>;

    /// Redraws `session` and blocks until a key arrives.
    fn next_key(&mut self, session: &mut EditSession) -> Key;
}

/// Mutable editing context for a single buffer.
pub struct EditSession {
    buffer: TextRope,
    cursor_offset: usize,
    cursor_row: usize,
    cursor_col: usize,
    history: History,
    filename: Option<PathBuf>,
    status_message: Option<String>,
    last_search_query: Option<String>,
    options: SessionOptions,
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("len", &self.buffer.len())
            .field("cursor_offset", &self.cursor_offset)
            .field("cursor_row", &self.cursor_row)
            .field("cursor_col", &self.cursor_col)
            .field("filename", &self.filename)
            .field("undo_len", &self.history.undo_len())
            .field("redo_len", &self.history.redo_len())
            .finish()
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl EditSession {
    /// Creates an unnamed session with an empty buffer.
    pub fn new(options: SessionOptions) -> Self {
        Self::with_text(b"", options)
    }

    /// Creates an unnamed session holding `text`, cursor at the start.
    pub fn with_text(text: impl AsRef<[u8]>, options: SessionOptions) -> Self {
        Self {
            buffer: TextRope::from_bytes(text.as_ref()),
            cursor_offset: 0,
            cursor_row: 1,
            cursor_col: 1,
            history: History::new(options.history),
            filename: None,
            status_message: None,
            last_search_query: None,
            options,
        }
    }

    pub fn buffer(&self) -> &TextRope {
        &self.buffer
    }

    pub fn text(&self) -> Vec<u8> {
        self.buffer.to_bytes()
    }

    pub fn cursor_offset(&self) -> usize {
        self.cursor_offset
    }

    pub fn cursor_row(&self) -> usize {
        self.cursor_row
    }

    pub fn cursor_col(&self) -> usize {
        self.cursor_col
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.filename = Some(path.into());
    }

    /// Filename for display, or `[No Name]`.
    pub fn display_name(&self) -> String {
        match &self.filename {
            Some(path) => path.display().to_string(),
            None => NO_NAME.to_string(),
        }
    }

    pub fn last_search_query(&self) -> Option<&str> {
        self.last_search_query.as_deref()
    }

    /// Moves the cursor to `offset`, clamped to the buffer length.
    pub fn set_cursor_offset(&mut self, offset: usize) {
        self.cursor_offset = offset.min(self.buffer.len());
        self.recompute_cursor_position();
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Returns the pending status message and clears it.
    pub fn take_status(&mut self) -> Option<String> {
        self.status_message.take()
    }

    pub fn status(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // ── Editing ────────────────────────────────────────────────────────

    /// Inserts `text` at the cursor and advances past it.
    ///
    /// Typing into an empty buffer replaces it outright and is not recorded
    /// in the history. An insert the rope rejects leaves the session as it
    /// was.
    pub fn insert_text(&mut self, text: impl AsRef<[u8]>) {
        let text = text.as_ref();
        if text.is_empty() {
            return;
        }

        if self.buffer.is_empty() {
            self.buffer = TextRope::from_bytes(text);
            self.cursor_offset = text.len();
            self.recompute_cursor_position();
            return;
        }

        match self.buffer.insert(self.cursor_offset, text) {
            Ok(rope) => {
                self.history.record(Action::insert(self.cursor_offset, text));
                self.replace_buffer(rope);
                self.cursor_offset += text.len();
            }
            Err(e) => tracing::debug!("insert rejected: {e}"),
        }
        self.recompute_cursor_position();
    }

    pub fn insert_newline(&mut self) {
        self.insert_text(b"\n");
    }

    /// Deletes the byte before the cursor.
    pub fn delete_backward(&mut self) {
        if self.cursor_offset == 0 {
            return;
        }
        let position = self.cursor_offset - 1;

        let deleted = self.buffer.index(position).and_then(|byte| {
            let rope = self.buffer.delete(position, self.cursor_offset)?;
            Ok((byte, rope))
        });
        match deleted {
            Ok((byte, rope)) => {
                self.history.record(Action::delete(position, [byte]));
                self.replace_buffer(rope);
                self.cursor_offset = position;
            }
            Err(e) => tracing::debug!("delete rejected: {e}"),
        }
        self.recompute_cursor_position();
    }

    /// Reverts the most recent recorded edit.
    pub fn undo(&mut self) {
        if let Some(action) = self.history.undo() {
            self.apply(&action.inverse());
        }
    }

    /// Re-applies the most recently undone edit.
    pub fn redo(&mut self) {
        if let Some(action) = self.history.redo() {
            self.apply(&action);
        }
    }

    /// Applies `action` to the buffer without recording it.
    ///
    /// Inserts leave the cursor after the inserted bytes, deletes leave it
    /// at the deletion point.
    fn apply(&mut self, action: &Action) {
        let result = match action.kind {
            ActionKind::Insert => self
                .buffer
                .insert(action.position, &action.content)
                .map(|rope| (rope, action.end())),
            ActionKind::Delete => self
                .buffer
                .delete(action.position, action.end())
                .map(|rope| (rope, action.position)),
        };
        match result {
            Ok((rope, cursor)) => {
                self.replace_buffer(rope);
                self.cursor_offset = cursor;
            }
            Err(e) => tracing::warn!("history action could not be applied: {e}"),
        }
        self.recompute_cursor_position();
    }

    /// Swaps in a new buffer, compacting it once it grows too deep.
    fn replace_buffer(&mut self, rope: TextRope) {
        if rope.depth() > self.options.rebalance_depth {
            let before = rope.depth();
            self.buffer = rope.rebalance();
            tracing::debug!(
                before,
                after = self.buffer.depth(),
                len = self.buffer.len(),
                "rebalanced buffer"
            );
        } else {
            self.buffer = rope;
        }
    }

    // ── Dispatch ───────────────────────────────────────────────────────

    /// Handles one logical key.
    pub fn handle_key(&mut self, key: Key, io: &mut impl Interaction) -> Flow {
        match key {
            Key::Quit => return Flow::Quit,
            Key::Find => self.search(io),
            Key::FindNext => self.find_next(),
            Key::Save => self.save(io),
            Key::Undo => self.undo(),
            Key::Redo => self.redo(),
            Key::Backspace => self.delete_backward(),
            Key::Enter => self.insert_newline(),
            Key::Arrow(direction) => self.move_cursor(direction),
            Key::Char(c) => self.insert_text([c]),
            Key::Escape | Key::Other(_) => {}
        }
        Flow::Continue
    }

    /// Captures what the renderer needs. The status message is consumed.
    pub fn snapshot(&mut self) -> Snapshot {
        Snapshot {
            lines: self.lines(),
            cursor_row: self.cursor_row,
            cursor_col: self.cursor_col,
            filename: self.display_name(),
            status: self.take_status(),
        }
    }
}
