//! Snapshot-based undo/redo for the document

use crate::model::Document;
use std::collections::VecDeque;
use tracing::debug;

/// Default number of undo snapshots kept.
pub const DEFAULT_HISTORY_DEPTH: usize = 100;

/// Undo/redo stacks holding whole-document snapshots
///
/// Snapshots are owned clones, so later edits to the live document never
/// reach them.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Document>,
    redo_stack: Vec<Document>,
    max_depth: usize,
}

impl History {
    /// Create a history with the default depth (100)
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }

    /// Create with custom maximum undo depth
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(max_depth.min(DEFAULT_HISTORY_DEPTH)),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    /// Push a snapshot of `current` taken before a mutation.
    pub fn record(&mut self, current: &Document) {
        self.redo_stack.clear();
        self.undo_stack.push_back(current.clone());
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        debug!(depth = self.undo_stack.len(), "History snapshot recorded");
    }

    /// Drop the most recent snapshot without restoring it.
    ///
    /// Used when an operation recorded a snapshot and then failed.
    pub fn discard_last(&mut self) -> Option<Document> {
        self.undo_stack.pop_back()
    }

    /// Step back. `current` moves onto the redo stack and the previous
    /// snapshot is returned for the caller to install.
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let previous = self.undo_stack.pop_back()?;
        self.redo_stack.push(current.clone());
        Some(previous)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push_back(current.clone());
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
