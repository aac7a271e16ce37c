//! Bounded undo/redo history.

use crate::edit::EditCommand;

/// Maximum history depth in each direction.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// One recorded mutation.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// The executed command, carrying the state its inverse needs.
    pub command: EditCommand,
    /// Human-readable description for UI display; not load-bearing.
    pub description: String,
}

/// Undo/redo history stack.
///
/// Both stacks are bounded; pushing past the bound evicts the oldest
/// entry. Any new mutation clears the redo stack — branching history is
/// not supported.
#[derive(Debug)]
pub struct History {
    /// Commands that have been executed (most recent last).
    undo: Vec<HistoryEntry>,
    /// Commands that have been undone (most recent last).
    redo: Vec<HistoryEntry>,
    /// Maximum history depth.
    max_depth: usize,
}

impl History {
    /// Create a new history with the given maximum depth.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Record an executed command. Clears the redo stack.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.redo.clear();
        self.undo.push(entry);
        if self.undo.len() > self.max_depth {
            self.undo.remove(0);
        }
    }

    /// Pop the most recent command for undo. Returns its inverse, ready to
    /// apply; the entry moves to the redo stack.
    pub fn undo(&mut self) -> Option<EditCommand> {
        let entry = self.undo.pop()?;
        let inverse = entry.command.inverse();
        self.redo.push(entry);
        if self.redo.len() > self.max_depth {
            self.redo.remove(0);
        }
        Some(inverse)
    }

    /// Pop the most recent undone command for redo. Returns a replayable
    /// copy; the entry moves back onto the undo stack.
    pub fn redo(&mut self) -> Option<EditCommand> {
        let entry = self.redo.pop()?;
        let command = entry.command.clone();
        self.undo.push(entry);
        Some(command)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Description of the next undo step, if any.
    pub fn undo_description(&self) -> Option<&str> {
        self.undo.last().map(|e| e.description.as_str())
    }

    /// Description of the next redo step, if any.
    pub fn redo_description(&self) -> Option<&str> {
        self.redo.last().map(|e| e.description.as_str())
    }

    /// Number of undo steps available.
    pub fn undo_count(&self) -> usize {
        self.undo.len()
    }

    /// Number of redo steps available.
    pub fn redo_count(&self) -> usize {
        self.redo.len()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
