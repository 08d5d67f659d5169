//! Undo journal tracking edit history and the unsaved-changes flag.
//!
//! The journal stores action labels only; the actual inverse operations are
//! applied by the editing code. What the rest of the system needs from it is
//! the pair of capability flags (can undo / can redo) and whether the
//! current position differs from the last savepoint.

/// Journal of performed edits with a savepoint marker.
///
/// `position` is the number of applied actions; entries past it are
/// redoable. The project is dirty whenever `position != savepoint`.
#[derive(Debug, Clone, Default)]
pub struct UndoJournal {
    entries: Vec<String>,
    position: usize,
    savepoint: usize,
}

impl UndoJournal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly performed action, discarding any redoable tail.
    pub fn push(&mut self, label: impl Into<String>) {
        // A savepoint inside the discarded tail can never be reached again.
        if self.savepoint > self.position {
            self.savepoint = usize::MAX;
        }
        self.entries.truncate(self.position);
        self.entries.push(label.into());
        self.position += 1;
    }

    /// Whether there is an action to undo.
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    /// Whether there is an undone action to redo.
    pub fn can_redo(&self) -> bool {
        self.position < self.entries.len()
    }

    /// Step back one action. Returns the label of the undone action.
    pub fn undo(&mut self) -> Option<&str> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        Some(&self.entries[self.position])
    }

    /// Re-apply the most recently undone action.
    pub fn redo(&mut self) -> Option<&str> {
        if self.position >= self.entries.len() {
            return None;
        }
        let label = &self.entries[self.position];
        self.position += 1;
        Some(label)
    }

    /// Mark the current position as saved.
    pub fn mark_saved(&mut self) {
        self.savepoint = self.position;
    }

    /// Whether edits exist past the last savepoint (in either direction).
    pub fn has_unsaved_changes(&self) -> bool {
        self.position != self.savepoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_journal() {
        let journal = UndoJournal::new();
        assert!(!journal.can_undo());
        assert!(!journal.can_redo());
        assert!(!journal.has_unsaved_changes());
    }

    #[test]
    fn test_push_enables_undo_and_dirties() {
        let mut journal = UndoJournal::new();
        journal.push("add instrument");
        assert!(journal.can_undo());
        assert!(!journal.can_redo());
        assert!(journal.has_unsaved_changes());
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut journal = UndoJournal::new();
        journal.push("move event");
        journal.push("split event");

        assert_eq!(journal.undo(), Some("split event"));
        assert!(journal.can_redo());
        assert_eq!(journal.redo(), Some("split event"));
        assert!(!journal.can_redo());
    }

    #[test]
    fn test_mark_saved_clears_dirty() {
        let mut journal = UndoJournal::new();
        journal.push("add instrument");
        journal.mark_saved();
        assert!(!journal.has_unsaved_changes());

        // Undoing past the savepoint dirties again.
        journal.undo();
        assert!(journal.has_unsaved_changes());
    }

    #[test]
    fn test_push_discards_redo_tail() {
        let mut journal = UndoJournal::new();
        journal.push("a");
        journal.push("b");
        journal.undo();
        journal.push("c");

        assert!(!journal.can_redo());
        assert_eq!(journal.undo(), Some("c"));
    }

    #[test]
    fn test_savepoint_in_discarded_tail_stays_dirty() {
        let mut journal = UndoJournal::new();
        journal.push("a");
        journal.push("b");
        journal.mark_saved();
        journal.undo();
        journal.push("c");

        // The saved state is no longer reachable.
        assert!(journal.has_unsaved_changes());
        journal.undo();
        journal.undo();
        assert!(journal.has_unsaved_changes());
    }
}
