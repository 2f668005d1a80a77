//! Undo/redo history over full scene snapshots.
//!
//! Two stacks of deep element-list copies. The top of the undo stack always
//! mirrors the current state, so undo is available only when the stack
//! holds more than one entry. Snapshots are taken at gesture commit points
//! (pointer-up after a drag, deletion, paste), never per mutation, which
//! keeps one user gesture equal to one undo step.

use crate::element::Element;

/// Maximum number of retained undo snapshots. Oldest entries drop first.
pub const MAX_HISTORY: usize = 50;

/// Snapshot-based undo/redo engine.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: Vec<Vec<Element>>,
    redo_stack: Vec<Vec<Element>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to a single baseline snapshot.
    pub fn initialize(&mut self, elements: &[Element]) {
        self.undo_stack = vec![elements.to_vec()];
        self.redo_stack.clear();
    }

    /// Record a new state at a commit point. Clears the redo stack.
    pub fn push(&mut self, elements: &[Element]) {
        self.undo_stack.push(elements.to_vec());
        if self.undo_stack.len() > MAX_HISTORY {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Step back one state.
    ///
    /// Returns the previous snapshot, or None when only the baseline
    /// remains. The returned snapshot stays on top of the undo stack as
    /// the new current state; the superseded state moves to the redo stack.
    pub fn undo(&mut self, current: &[Element]) -> Option<Vec<Element>> {
        if self.undo_stack.len() <= 1 {
            return None;
        }
        self.redo_stack.push(current.to_vec());
        self.undo_stack.pop();
        self.undo_stack.last().cloned()
    }

    /// Step forward one previously undone state.
    pub fn redo(&mut self, current: &[Element]) -> Option<Vec<Element>> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(current.to_vec());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    #[cfg(test)]
    fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}
