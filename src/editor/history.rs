//! Snapshot undo/redo history.
//!
//! [`History`] keeps a `past / present / future` frame over immutable
//! snapshots. [`History::set`] and [`History::update`] are the only mutation
//! paths, and one call corresponds to one user-visible action. Setting a value
//! equal to the present is ignored, so history only grows on real change.
//!
//! # Example
//!
//! ```rust
//! use pagecraft::editor::History;
//!
//! let mut history = History::new(0);
//! history.set(1);
//! history.update(|n| n + 1);
//! assert_eq!(*history.present(), 2);
//! history.undo();
//! assert_eq!(*history.present(), 1);
//! history.redo();
//! assert_eq!(*history.present(), 2);
//! ```

use std::collections::VecDeque;

use tracing::trace;

/// Default number of past snapshots retained.
pub const DEFAULT_HISTORY_LIMIT: usize = 200;

#[derive(Debug, Clone)]
pub struct History<T> {
    past: Vec<T>,
    present: T,
    /// Front is the next snapshot `redo` restores.
    future: VecDeque<T>,
    limit: usize,
}

impl<T: Clone + PartialEq> History<T> {
    /// A pristine history with the default depth.
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    /// A pristine history retaining at most `limit` past snapshots.
    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            past: Vec::new(),
            present: initial,
            future: VecDeque::new(),
            limit: limit.max(1),
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    pub fn past(&self) -> &[T] {
        &self.past
    }

    pub fn future(&self) -> impl Iterator<Item = &T> {
        self.future.iter()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Install `next` as the present. Returns false (and changes nothing) when
    /// `next` equals the current present.
    pub fn set(&mut self, next: T) -> bool {
        if next == self.present {
            trace!("history: unchanged, skipping");
            return false;
        }
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        if self.past.len() > self.limit {
            self.past.remove(0);
        }
        self.future.clear();
        trace!(past = self.past.len(), "history: pushed");
        true
    }

    /// Compute the next present from the current one, then [`set`](Self::set) it.
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) -> bool {
        let next = f(&self.present);
        self.set(next)
    }

    /// Step back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        trace!(past = self.past.len(), future = self.future.len(), "history: undo");
        true
    }

    /// Step forward one snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        trace!(past = self.past.len(), future = self.future.len(), "history: redo");
        true
    }

    /// Replace the present and forget all history. Used when loading a
    /// document, which must not be undoable.
    pub fn reset(&mut self, next: T) {
        self.present = next;
        self.past.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_new() {
        let h = History::new("a");
        assert!(!h.can_undo());
        assert!(!h.can_redo());
        assert_eq!(*h.present(), "a");
    }

    #[test]
    fn test_set_equal_is_noop() {
        let mut h = History::new(1);
        assert!(h.set(2));
        assert!(h.undo());
        assert!(!h.set(1));
        assert_eq!(h.past_len(), 0);
        assert_eq!(h.future_len(), 1);
    }

    #[test]
    fn test_set_clears_future() {
        let mut h = History::new(1);
        h.set(2);
        h.set(3);
        h.undo();
        assert!(h.can_redo());
        h.set(4);
        assert!(!h.can_redo());
        assert_eq!(h.past(), &[1, 2]);
    }

    #[test]
    fn test_undo_redo_order() {
        let mut h = History::new(0);
        for i in 1..=3 {
            h.set(i);
        }
        h.undo();
        h.undo();
        assert_eq!(*h.present(), 1);
        assert_eq!(h.future().copied().collect::<Vec<_>>(), vec![2, 3]);
        h.redo();
        assert_eq!(*h.present(), 2);
    }

    #[test]
    fn test_undo_redo_empty_noop() {
        let mut h = History::new(0);
        assert!(!h.undo());
        assert!(!h.redo());
        assert_eq!(*h.present(), 0);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut h = History::with_limit(0, 2);
        h.set(1);
        h.set(2);
        h.set(3);
        assert_eq!(h.past(), &[1, 2]);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut h = History::new(0);
        h.set(1);
        h.set(2);
        h.undo();
        h.reset(10);
        assert_eq!(*h.present(), 10);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }

    #[test]
    fn test_update_with_closure() {
        let mut h = History::new(vec![1]);
        assert!(h.update(|v| {
            let mut next = v.clone();
            next.push(2);
            next
        }));
        assert!(!h.update(|v| v.clone()));
        assert_eq!(h.past_len(), 1);
    }
}
