//! Loading and saving the session buffer.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::IoFailure;

use super::{EditSession, Interaction, SessionOptions};

pub const SAVE_PROMPT: &str = "Save as (Esc to cancel):";

/// Writes `bytes` to `path` in one call, returning the number written.
///
/// # Errors
///
/// Returns an [`IoFailure`] naming the path if the write fails.
pub fn write_file(path: &Path, bytes: &[u8]) -> Result<usize, IoFailure> {
    std::fs::write(path, bytes).map_err(|source| IoFailure {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(bytes.len())
}

impl EditSession {
    /// Opens `path` for editing.
    ///
    /// Never fails: a missing file starts an empty buffer that will be
    /// created on save, and any other read error starts an empty buffer with
    /// the error shown in the status line.
    pub fn open(path: impl Into<PathBuf>, options: SessionOptions) -> Self {
        let path = path.into();
        let mut session = match std::fs::read(&path) {
            Ok(bytes) => {
                tracing::info!(path = %path.display(), len = bytes.len(), "opened file");
                Self::with_text(bytes, options)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "new file");
                Self::new(options)
            }
            Err(source) => {
                let failure = IoFailure {
                    path: path.clone(),
                    source,
                };
                tracing::warn!("{failure}");
                let mut session = Self::new(options);
                session.set_status(format!("Error opening file: {failure}"));
                session
            }
        };
        session.filename = Some(path);
        session
    }

    /// Writes the buffer to its file, prompting for a name if it has none.
    ///
    /// The outcome is reported through the status message.
    pub fn save(&mut self, io: &mut impl Interaction) {
        if self.filename.is_none() {
            match io.prompt(SAVE_PROMPT) {
                Some(name) if !name.is_empty() => self.filename = Some(PathBuf::from(name)),
                _ => {
                    self.set_status("Save canceled");
                    return;
                }
            }
        }
        let Some(path) = self.filename.clone() else {
            return;
        };

        match write_file(&path, &self.buffer.to_bytes()) {
            Ok(written) => {
                tracing::info!(path = %path.display(), written, "saved file");
                self.set_status(format!("Saved {written} bytes to {}", path.display()));
            }
            Err(e) => {
                tracing::warn!("{e}");
                self.set_status(format!("Error saving file: {e}"));
            }
        }
    }
}
