//! Bounded undo/redo history over grayscale snapshots.
//!
//! The log is a bounded deque of owned buffers plus a cursor. Pushing
//! while the cursor sits behind the newest entry discards the redo tail
//! first (the branching-history rule: a new edit invalidates the states
//! it forked away from). When the log is full the oldest entry falls off
//! and the cursor shifts with it.

use std::collections::VecDeque;

use roentgen_pipeline::GrayImage;

/// Bounded sequence of image snapshots with an undo/redo cursor.
///
/// Entries are full buffers rather than deltas, so stepping in either
/// direction is a single clone. At the default capacity the log holds at
/// most twenty copies of the image.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<GrayImage>,
    cursor: usize,
    capacity: usize,
}

impl HistoryLog {
    /// Default maximum number of snapshots held at once.
    pub const DEFAULT_CAPACITY: usize = 20;

    /// Create an empty log with [`Self::DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create an empty log holding at most `capacity` snapshots.
    ///
    /// A zero capacity is raised to one so the newest state always has a
    /// slot.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Record `entry` as the newest state and move the cursor onto it.
    ///
    /// Redo states beyond the cursor are discarded first. If the log
    /// then exceeds its capacity the oldest entry is evicted.
    pub fn push(&mut self, entry: GrayImage) {
        if self.cursor + 1 < self.entries.len() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(entry);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step the cursor back one entry and return the newly current state.
    ///
    /// At the oldest entry, or on an empty log, this is a no-op
    /// returning `None`.
    pub fn undo(&mut self) -> Option<&GrayImage> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step the cursor forward one entry and return the newly current
    /// state.
    ///
    /// At the newest entry, or on an empty log, this is a no-op
    /// returning `None`.
    pub fn redo(&mut self) -> Option<&GrayImage> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// The entry the cursor addresses, if any.
    #[must_use]
    pub fn current(&self) -> Option<&GrayImage> {
        self.entries.get(self.cursor)
    }

    /// Entry at `index`, oldest first.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&GrayImage> {
        self.entries.get(index)
    }

    /// Number of snapshots currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no snapshot has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of snapshots held at once.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cursor position, or `None` while the log is empty.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        if self.entries.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Returns `true` if a state older than the current one exists.
    #[must_use]
    pub const fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns `true` if a state newer than the current one exists.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Drop every snapshot and reset the cursor.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use image::Luma;

    use super::*;

    /// 1x1 snapshot whose single sample identifies it.
    fn shade(v: u8) -> GrayImage {
        GrayImage::from_pixel(1, 1, Luma([v]))
    }

    fn value(img: &GrayImage) -> u8 {
        img.get_pixel(0, 0)[0]
    }

    #[test]
    fn empty_log_has_nothing_to_step_to() {
        let mut log = HistoryLog::new();
        assert!(log.is_empty());
        assert!(log.cursor().is_none());
        assert!(log.current().is_none());
        assert!(log.undo().is_none());
        assert!(log.redo().is_none());
        assert!(!log.can_undo());
        assert!(!log.can_redo());
    }

    #[test]
    fn push_moves_the_cursor_to_the_newest_entry() {
        let mut log = HistoryLog::new();
        log.push(shade(1));
        log.push(shade(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.cursor(), Some(1));
        assert_eq!(value(log.current().unwrap()), 2);
    }

    #[test]
    fn push_beyond_capacity_evicts_the_oldest() {
        let mut log = HistoryLog::new();
        for i in 0..25 {
            log.push(shade(i));
        }
        assert_eq!(log.len(), 20);
        // Pushes 0..=4 fell off; the oldest survivor is the 6th push.
        assert_eq!(value(log.get(0).unwrap()), 5);
        assert_eq!(log.cursor(), Some(19));
        assert_eq!(value(log.current().unwrap()), 24);
    }

    #[test]
    fn push_after_undo_discards_the_redo_tail() {
        let mut log = HistoryLog::new();
        log.push(shade(1)); // A
        log.push(shade(2)); // B
        log.push(shade(3)); // C
        assert!(log.undo().is_some());
        assert!(log.undo().is_some());
        log.push(shade(4)); // D replaces B and C

        assert_eq!(log.len(), 2);
        assert_eq!(value(log.get(0).unwrap()), 1);
        assert_eq!(value(log.get(1).unwrap()), 4);
        assert_eq!(log.cursor(), Some(1));
        assert!(log.redo().is_none(), "the discarded tail must stay gone");
    }

    #[test]
    fn undo_then_redo_walks_the_timeline() {
        let mut log = HistoryLog::new();
        log.push(shade(1));
        log.push(shade(2));
        log.push(shade(3));

        assert_eq!(value(log.undo().unwrap()), 2);
        assert_eq!(value(log.undo().unwrap()), 1);
        assert!(log.undo().is_none(), "oldest entry is the floor");
        assert_eq!(value(log.redo().unwrap()), 2);
        assert_eq!(value(log.redo().unwrap()), 3);
        assert!(log.redo().is_none(), "newest entry is the ceiling");
    }

    #[test]
    fn boundary_noops_leave_the_cursor_alone() {
        let mut log = HistoryLog::new();
        log.push(shade(7));
        assert!(log.undo().is_none());
        assert_eq!(log.cursor(), Some(0));
        assert!(log.redo().is_none());
        assert_eq!(log.cursor(), Some(0));
        assert_eq!(value(log.current().unwrap()), 7);
    }

    #[test]
    fn can_undo_and_redo_track_the_cursor() {
        let mut log = HistoryLog::new();
        log.push(shade(1));
        log.push(shade(2));
        assert!(log.can_undo());
        assert!(!log.can_redo());
        log.undo();
        assert!(!log.can_undo());
        assert!(log.can_redo());
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut log = HistoryLog::with_capacity(0);
        assert_eq!(log.capacity(), 1);
        log.push(shade(1));
        log.push(shade(2));
        assert_eq!(log.len(), 1);
        assert_eq!(value(log.current().unwrap()), 2);
        assert!(!log.can_undo());
    }

    #[test]
    fn clear_empties_the_log() {
        let mut log = HistoryLog::new();
        log.push(shade(1));
        log.push(shade(2));
        log.clear();
        assert!(log.is_empty());
        assert!(log.cursor().is_none());
        assert!(log.undo().is_none());
    }
}
