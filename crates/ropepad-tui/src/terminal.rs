//! Raw terminal mode with timed reads.
//!
//! Key reads must return after a short wait even when nothing was typed,
//! so on top of crossterm's raw mode the termios `VMIN`/`VTIME` pair is set
//! to "return after `VTIME` tenths of a second, with or without data".

use std::io::{self, IsTerminal, Read, Write};

use anyhow::{bail, Context, Result};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use nix::sys::termios::{self, SetArg, SpecialCharacterIndices, Termios};

use ropepad_core::ByteSource;

/// Puts the terminal in raw mode on the alternate screen until dropped.
pub struct RawTerminal {
    original: Termios,
}

impl RawTerminal {
    /// Enters raw mode with reads timing out after `timeout_ds` tenths of a
    /// second.
    ///
    /// # Errors
    ///
    /// Fails if stdin is not a terminal or its attributes cannot be changed.
    pub fn enter(timeout_ds: u8) -> Result<Self> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            bail!("stdin is not a terminal");
        }

        let original = termios::tcgetattr(&stdin).context("failed to read terminal attributes")?;
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let guard = Self { original };

        let mut timed = termios::tcgetattr(&stdin).context("failed to read terminal attributes")?;
        timed.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
        timed.control_chars[SpecialCharacterIndices::VTIME as usize] = timeout_ds;
        termios::tcsetattr(&stdin, SetArg::TCSAFLUSH, &timed)
            .context("failed to set read timeout")?;

        execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
        tracing::debug!(timeout_ds, "terminal in raw mode");
        Ok(guard)
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, LeaveAlternateScreen);
        let _ = stdout.flush();
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!("failed to leave raw mode: {e}");
        }
        if let Err(e) = termios::tcsetattr(io::stdin(), SetArg::TCSAFLUSH, &self.original) {
            tracing::warn!("failed to restore terminal attributes: {e}");
        }
    }
}

/// Stdin as a [`ByteSource`]. A read that times out yields `None`.
#[derive(Debug, Default)]
pub struct StdinBytes;

impl ByteSource for StdinBytes {
    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(e) => {
                if e.kind() != io::ErrorKind::Interrupted {
                    tracing::warn!("stdin read failed: {e}");
                }
                None
            }
        }
    }
}
