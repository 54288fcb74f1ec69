//! Configuration for the history system.

/// Maximum number of actions kept on the undo stack before the oldest
/// ones are evicted.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Configuration for the history system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Max actions on the undo stack. Always at least 1.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl HistoryConfig {
    /// Creates a config with the given depth, clamped to at least one action.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }
}
