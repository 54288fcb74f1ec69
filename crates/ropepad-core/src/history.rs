// Re-exports from ropepad-mod-history so callers only depend on the core crate.
pub use ropepad_mod_history::{Action, ActionKind, History, HistoryConfig};
