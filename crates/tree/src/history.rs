//! Linear undo/redo history of tree snapshots

use log::{debug, trace};

/// A linear undo/redo stack of snapshots.
///
/// The index always points at the snapshot currently on display. Committing
/// after an undo discards every redo entry past the index. The history is
/// unbounded.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    index: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: None,
        }
    }
}

impl<T> History<T> {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new snapshot, dropping any redo entries
    pub fn commit(&mut self, snapshot: T) {
        let keep = self.index.map_or(0, |i| i + 1);
        let discarded = self.entries.len() - keep;
        if discarded > 0 {
            trace!("discarding {discarded} redo entries");
        }
        self.entries.truncate(keep);
        self.entries.push(snapshot);
        self.index = Some(self.entries.len() - 1);
        debug!("history commit, {} entries", self.entries.len());
    }

    /// Step back one snapshot.
    ///
    /// Returns `None` without moving when already at the first entry (or when
    /// empty).
    pub fn undo(&mut self) -> Option<&T> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                debug!("undo to {}/{}", i, self.entries.len());
                self.entries.get(i - 1)
            }
            _ => None,
        }
    }

    /// Step forward one snapshot.
    ///
    /// Returns `None` without moving when already at the last entry.
    pub fn redo(&mut self) -> Option<&T> {
        let next = self.index.map_or(0, |i| i + 1);
        if next >= self.entries.len() || self.index.is_none() {
            return None;
        }
        self.index = Some(next);
        debug!("redo to {}/{}", next + 1, self.entries.len());
        self.entries.get(next)
    }

    /// The snapshot at the current index
    pub fn current(&self) -> Option<&T> {
        self.index.and_then(|i| self.entries.get(i))
    }

    /// Index of the current snapshot, `None` before the first commit
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Returns true if [`History::undo`] would move
    pub fn can_undo(&self) -> bool {
        self.index.is_some_and(|i| i > 0)
    }

    /// Returns true if [`History::redo`] would move
    pub fn can_redo(&self) -> bool {
        self.index.is_some_and(|i| i + 1 < self.entries.len())
    }

    /// Number of stored snapshots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been committed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All snapshots, oldest first
    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history() {
        let mut history: History<i32> = History::new();
        assert!(history.is_empty());
        assert_eq!(history.index(), None);
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), None);
        assert_eq!(history.current(), None);
    }

    #[test]
    fn test_undo_stops_at_first_entry() {
        let mut history = History::new();
        history.commit("a");
        assert!(!history.can_undo());
        assert_eq!(history.undo(), None);
        assert_eq!(history.current(), Some(&"a"));
    }

    #[test]
    fn test_undo_redo() {
        let mut history = History::new();
        history.commit(1);
        history.commit(2);
        history.commit(3);

        assert_eq!(history.undo(), Some(&2));
        assert_eq!(history.undo(), Some(&1));
        assert_eq!(history.undo(), None);
        assert_eq!(history.redo(), Some(&2));
        assert_eq!(history.redo(), Some(&3));
        assert_eq!(history.redo(), None);
        assert_eq!(history.index(), Some(2));
    }

    #[test]
    fn test_commit_discards_redo() {
        let mut history = History::new();
        history.commit(1);
        history.commit(2);
        history.commit(3);
        history.undo();
        history.undo();

        history.commit(10);
        assert_eq!(history.entries(), &[1, 10]);
        assert!(!history.can_redo());
        assert_eq!(history.redo(), None);
    }
}
