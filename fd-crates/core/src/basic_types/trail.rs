use std::ops::Deref;

use crate::fd_assert_simple;

/// A stack of entries partitioned into decision levels.
///
/// Level 0 is the root; every call to [`Trail::open_level`] starts a new level on top.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    entries: Vec<T>,
    /// `level_starts[i]` is the number of entries that precede level `i + 1`.
    level_starts: Vec<usize>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            entries: Vec::new(),
            level_starts: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn open_level(&mut self) {
        self.level_starts.push(self.entries.len());
    }

    pub(crate) fn level(&self) -> usize {
        self.level_starts.len()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }

    /// Pops every entry recorded above `level`, most recent first.
    pub(crate) fn backtrack_to(&mut self, level: usize) -> impl Iterator<Item = T> + '_ {
        fd_assert_simple!(level < self.level());

        let keep = self.level_starts[level];
        self.level_starts.truncate(level);
        self.entries.drain(keep..).rev()
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail_with_levels() -> Trail<u32> {
        let mut trail = Trail::default();
        trail.push(1);
        for entry in 2..=4 {
            trail.open_level();
            trail.push(entry);
        }
        trail
    }

    #[test]
    fn entries_are_kept_in_push_order() {
        let trail = trail_with_levels();

        assert_eq!(&[1, 2, 3, 4], &*trail);
        assert_eq!(3, trail.level());
    }

    #[test]
    fn backtracking_keeps_the_lower_levels() {
        let mut trail = trail_with_levels();

        let _ = trail.backtrack_to(1);

        assert_eq!(&[1, 2], &*trail);
        assert_eq!(1, trail.level());
    }

    #[test]
    fn popped_entries_come_most_recent_first() {
        let mut trail = trail_with_levels();

        let popped = trail.backtrack_to(0).collect::<Vec<_>>();

        assert_eq!(vec![4, 3, 2], popped);
        assert_eq!(&[1], &*trail);
    }
}
