//! Undo/redo stacks for a single editing session.
use crate::action::Action;
use crate::config::HistoryConfig;

/// Manages undo/redo history for a single buffer.
///
/// Both stacks are ordered oldest first, so the newest action is always
/// on top. Recording a new action clears the redo stack; undo and redo
/// only move actions between the two stacks.
pub struct History {
    /// Undo stack, ordered chronologically (oldest first).
    undo_stack: Vec<Action>,
    /// Redo stack with the most recently undone action on top.
    redo_stack: Vec<Action>,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("undo_len", &self.undo_stack.len())
            .field("redo_len", &self.redo_stack.len())
            .field("max_depth", &self.config.max_depth)
            .finish()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl History {
    /// Creates an empty history.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            config,
        }
    }

    /// Records a user-initiated edit.
    ///
    /// Clears the redo stack. Evicts the oldest actions once the undo
    /// stack grows past `max_depth`.
    pub fn record(&mut self, action: Action) {
        self.undo_stack.push(action);
        self.redo_stack.clear();

        if self.undo_stack.len() > self.config.max_depth {
            let excess = self.undo_stack.len() - self.config.max_depth;
            self.undo_stack.drain(..excess);
            tracing::debug!("Evicted {excess} oldest undo actions");
        }
    }

    /// Pops the newest action for undoing and moves it onto the redo stack.
    ///
    /// Returns `None` if there's nothing to undo.
    pub fn undo(&mut self) -> Option<Action> {
        let action = self.undo_stack.pop()?;
        self.redo_stack.push(action.clone());
        Some(action)
    }

    /// Pops the most recently undone action and moves it back onto the
    /// undo stack.
    ///
    /// Returns `None` if there's nothing to redo.
    pub fn redo(&mut self) -> Option<Action> {
        let action = self.redo_stack.pop()?;
        self.undo_stack.push(action.clone());
        Some(action)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Undo stack, oldest first.
    pub fn undo_stack(&self) -> &[Action] {
        &self.undo_stack
    }

    /// Redo stack, most recently undone last.
    pub fn redo_stack(&self) -> &[Action] {
        &self.redo_stack
    }

    /// Drops all recorded actions.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }
}
