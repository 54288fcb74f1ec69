//! Terminal frontend: raw-mode setup, screen drawing and the key loop.

mod app;
pub mod render;
#[cfg(unix)]
pub mod terminal;

use std::path::PathBuf;

pub use app::{run_session, session_options, TerminalIo};
#[cfg(unix)]
pub use app::run;
pub use render::Renderer;

/// Arguments passed from the command line to the editor.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// File to open. `None` starts an unnamed buffer.
    pub file: Option<PathBuf>,
}
