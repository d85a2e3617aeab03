//! Bounded undo/redo stacks of full layer snapshots.

use std::collections::VecDeque;
use std::mem;

use super::layer::Layer;

/// Default maximum number of snapshots kept in each stack.
pub const DEFAULT_MAX_DEPTH: usize = 20;

/// Linear undo/redo history.
///
/// Both stacks hold deep copies of the annotation layer. Each is capped at
/// `max_depth` entries; the oldest entry is evicted on overflow, so memory
/// stays within `2 * max_depth * layer_area * 4` bytes.
#[derive(Debug)]
pub struct History {
    undo: VecDeque<Layer>,
    redo: VecDeque<Layer>,
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo: VecDeque::with_capacity(max_depth),
            redo: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Records the layer state taken just before an edit and drops any redo states.
    pub fn record(&mut self, snapshot: Layer) {
        push_bounded(&mut self.undo, snapshot, self.max_depth, "undo");
        if !self.redo.is_empty() {
            log::debug!("Discarding {} redo state(s) after new edit", self.redo.len());
            self.redo.clear();
        }
    }

    /// Swaps `current` with the most recent undo state. Returns false when empty.
    pub fn undo(&mut self, current: &mut Layer) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            return false;
        };
        let replaced = mem::replace(current, previous);
        push_bounded(&mut self.redo, replaced, self.max_depth, "redo");
        true
    }

    /// Swaps `current` with the most recent redo state. Returns false when empty.
    pub fn redo(&mut self, current: &mut Layer) -> bool {
        let Some(next) = self.redo.pop_back() else {
            return false;
        };
        let replaced = mem::replace(current, next);
        push_bounded(&mut self.undo, replaced, self.max_depth, "undo");
        true
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

fn push_bounded(stack: &mut VecDeque<Layer>, layer: Layer, max_depth: usize, name: &str) {
    stack.push_back(layer);
    while stack.len() > max_depth {
        stack.pop_front();
        log::debug!("Evicted oldest {} snapshot (limit {})", name, max_depth);
    }
}
