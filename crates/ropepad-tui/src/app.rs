//! The editor's key loop and its terminal-backed [`Interaction`].

use std::io::Write;

use anyhow::{Context, Result};

use ropepad_config::AppConfig;
use ropepad_core::history::HistoryConfig;
use ropepad_core::prompt::read_line;
use ropepad_core::{read_key, ByteSource, EditSession, Flow, Interaction, Key, SessionOptions};

use crate::render::Renderer;

/// Session tunables taken from the app config.
pub fn session_options(config: &AppConfig) -> SessionOptions {
    SessionOptions {
        rebalance_depth: config.rebalance_depth,
        history: HistoryConfig::with_max_depth(config.history_max_depth),
    }
}

/// Reads keys from a byte source and draws through a [`Renderer`].
pub struct TerminalIo<S: ByteSource, W: Write> {
    input: S,
    renderer: Renderer<W>,
    follow_terminal_size: bool,
}

impl<S: ByteSource, W: Write> TerminalIo<S, W> {
    pub fn new(input: S, renderer: Renderer<W>) -> Self {
        Self {
            input,
            renderer,
            follow_terminal_size: false,
        }
    }

    /// Re-reads the terminal size before every redraw.
    pub fn follow_terminal_size(mut self) -> Self {
        self.follow_terminal_size = true;
        self
    }

    pub fn renderer(&self) -> &Renderer<W> {
        &self.renderer
    }

    /// Polls until a key arrives; timeouts are skipped.
    pub fn wait_key(&mut self) -> Key {
        loop {
            if let Some(key) = read_key(&mut self.input) {
                return key;
            }
        }
    }

    /// Draws the session, consuming its pending status message.
    pub fn refresh(&mut self, session: &mut EditSession) -> Result<()> {
        if self.follow_terminal_size {
            if let Ok((cols, rows)) = crossterm::terminal::size() {
                self.renderer.resize(cols, rows);
            }
        }
        self.renderer
            .draw(&session.snapshot())
            .context("failed to draw screen")
    }
}

impl<S: ByteSource, W: Write> Interaction for TerminalIo<S, W> {
    fn prompt(&mut self, label: &str) -> Option<String> {
        let Self {
            input, renderer, ..
        } = self;
        read_line(
            label,
            || read_key(&mut *input),
            |label, text| {
                if let Err(e) = renderer.draw_prompt(label, text) {
                    tracing::warn!("failed to draw prompt: {e}");
                }
            },
        )
    }

    fn next_key(&mut self, session: &mut EditSession) -> Key {
        if let Err(e) = self.refresh(session) {
            tracing::warn!("{e:#}");
        }
        self.wait_key()
    }
}

/// Runs the key loop until the session asks to quit, then clears the screen.
///
/// # Errors
///
/// Returns an error if the screen cannot be drawn.
pub fn run_session<S: ByteSource, W: Write>(
    session: &mut EditSession,
    io: &mut TerminalIo<S, W>,
) -> Result<()> {
    loop {
        io.refresh(session)?;
        let key = io.wait_key();
        if session.handle_key(key, io) == Flow::Quit {
            break;
        }
    }
    io.renderer.clear().context("failed to clear screen")?;
    tracing::info!("session closed");
    Ok(())
}

/// Opens the requested file and edits it in the terminal.
///
/// # Errors
///
/// Fails if the terminal cannot be put into raw mode or drawn to.
#[cfg(unix)]
pub fn run(args: crate::StartupArgs, config: &AppConfig) -> Result<()> {
    use crate::terminal::{RawTerminal, StdinBytes};

    let options = session_options(config);
    let mut session = match args.file {
        Some(path) => EditSession::open(path, options),
        None => EditSession::new(options),
    };

    let _terminal = RawTerminal::enter(config.key_timeout_deciseconds())?;
    let (cols, rows) = crossterm::terminal::size().context("failed to read terminal size")?;
    let renderer = Renderer::new(std::io::stdout(), cols, rows, config.show_tildes);
    let mut io = TerminalIo::new(StdinBytes, renderer).follow_terminal_size();
    run_session(&mut session, &mut io)
}
