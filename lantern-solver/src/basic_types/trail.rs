use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::lantern_assert_simple;

/// An undo log which is partitioned by checkpoints.
///
/// Every entry pushed after a call to [`Trail::new_checkpoint`] belongs to that checkpoint; calling
/// [`Trail::synchronise`] hands back (newest first) every entry that was pushed after the target
/// checkpoint, so that the owner can undo them.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// At index i is the length of the trail when checkpoint i + 1 was created.
    checkpoint_delimiters: Vec<usize>,
    entries: Vec<T>,
}

// Implemented by hand so that `T` does not need to implement `Default`.
impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: 0,
            checkpoint_delimiters: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.checkpoint_delimiters.push(self.entries.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    /// Go back to `checkpoint`, returning the removed entries in reverse order of insertion.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) -> Rev<Drain<'_, T>> {
        lantern_assert_simple!(
            checkpoint < self.current_checkpoint,
            "cannot synchronise to checkpoint {checkpoint} from checkpoint {}",
            self.current_checkpoint
        );

        let new_len = self.checkpoint_delimiters[checkpoint];

        self.current_checkpoint = checkpoint;
        self.checkpoint_delimiters.truncate(checkpoint);
        self.entries.drain(new_len..).rev()
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_visible_in_insertion_order() {
        let mut trail = Trail::default();
        trail.push('a');
        trail.push('b');

        assert_eq!(&['a', 'b'], trail.deref());
    }

    #[test]
    fn synchronising_to_the_root_empties_a_trail_without_root_entries() {
        let mut trail = Trail::default();

        trail.new_checkpoint();
        trail.push(10);
        trail.push(11);
        let undone = trail.synchronise(0).collect::<Vec<_>>();

        assert_eq!(vec![11, 10], undone);
        assert!(trail.is_empty());
        assert_eq!(0, trail.get_checkpoint());
    }

    #[test]
    fn synchronising_skips_over_multiple_checkpoints() {
        let mut trail = Trail::default();
        trail.push(1);
        trail.new_checkpoint();
        trail.push(2);
        trail.new_checkpoint();
        trail.new_checkpoint();
        trail.push(3);

        let undone = trail.synchronise(1).collect::<Vec<_>>();

        assert_eq!(vec![3], undone);
        assert_eq!(&[1, 2], trail.deref());
        assert_eq!(1, trail.get_checkpoint());
    }
}
