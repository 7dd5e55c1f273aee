// SPDX-License-Identifier: MPL-2.0
//! Linear undo/redo history.
//!
//! Entries are full snapshots stored in order with a cursor pointing at the
//! current one. Pushing after an undo discards everything past the cursor,
//! so there is never a redo tree to walk.

/// Ordered list of snapshots with a cursor.
///
/// A history is never empty: it is seeded with the initial entry, and the
/// cursor always stays inside `[0, len - 1]`.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T> History<T> {
    /// Creates a history seeded with a single entry.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Appends an entry after the cursor, dropping any redo tail.
    pub fn push(&mut self, entry: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back one entry. Returns `None` (and does not move) at the start.
    pub fn undo(&mut self) -> Option<&T> {
        if self.can_undo() {
            self.cursor -= 1;
            self.entries.get(self.cursor)
        } else {
            None
        }
    }

    /// Steps forward one entry. Returns `None` (and does not move) at the end.
    pub fn redo(&mut self) -> Option<&T> {
        if self.can_redo() {
            self.cursor += 1;
            self.entries.get(self.cursor)
        } else {
            None
        }
    }

    /// The entry at the cursor.
    #[must_use]
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    #[allow(clippy::len_without_is_empty)] // never empty
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
