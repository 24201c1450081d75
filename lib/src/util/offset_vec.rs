use std::fmt::{Debug, Error, Formatter};
use std::result::Result;

/// Elements with a width (eg. when used in an `OffsetVec`)
pub trait Width {
    fn width(&self) -> usize;
}

/// A vector of elements of different logical "widths", where offsets into the vector are given in
/// terms of the sum of the widths of the previous elements (as opposed to the number of preceding
/// elements).
///
/// Two places in the runtime are shaped like this:
///
///   - constant pool and indices (most entries have width 1, but `long` and `double` have width 2)
///   - operand stacks (a `long` or `double` value occupies two slots of `max_stack`)
///
#[derive(Clone)]
pub struct OffsetVec<T: Sized> {
    /// Entries, along with their offset
    entries: Vec<(Offset, T)>,

    /// Offset of the next element to be added
    offset_len: Offset,

    /// Offset for the first element (usually 0, but 1 for constant pools)
    initial_offset: Offset,
}

/// Offset into an `OffsetVec`
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Offset(pub usize);

impl<T: Sized + Width> OffsetVec<T> {
    /// New empty offset vector
    pub fn new() -> OffsetVec<T> {
        OffsetVec::new_starting_at(Offset(0))
    }

    /// New empty offset vector, with a custom starting offset
    pub fn new_starting_at(initial_offset: Offset) -> OffsetVec<T> {
        OffsetVec {
            entries: vec![],
            offset_len: initial_offset,
            initial_offset,
        }
    }

    /// Length of the `OffsetVec` (aka. number of entries)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current offset size of the `OffsetVec` (aka. offset of the next element to be added)
    pub fn offset_len(&self) -> Offset {
        self.offset_len
    }

    /// Total width of all entries
    pub fn total_width(&self) -> usize {
        self.offset_len.0 - self.initial_offset.0
    }

    /// Add an entry to the back
    pub fn push(&mut self, slot: T) -> Offset {
        let offset = self.offset_len;
        self.offset_len.0 += slot.width();
        self.entries.push((offset, slot));

        offset
    }

    /// Remove an entry from the back
    pub fn pop(&mut self) -> Option<(Offset, T)> {
        self.entries.pop().map(|(off, elem)| {
            self.offset_len = off;
            (off, elem)
        })
    }

    /// Peek at the entry at the back
    pub fn last(&self) -> Option<&T> {
        self.entries.last().map(|(_, elem)| elem)
    }

    /// Empty the vector
    pub fn clear(&mut self) {
        self.entries.clear();
        self.offset_len = self.initial_offset;
    }

    /// Get an entry (and its index) by its offset in the vector
    ///
    /// Note: this uses binary search to find the offset
    pub fn get_offset(&self, offset: Offset) -> OffsetResult<T> {
        match self.entries.binary_search_by_key(&offset, |(off, _)| *off) {
            Err(insert_at) if insert_at == self.entries.len() => OffsetResult::TooLarge,
            Err(insert_at) => OffsetResult::InvalidOffset(insert_at),
            Ok(found_idx) => OffsetResult::Ok(found_idx, &self.entries[found_idx].1),
        }
    }

    /// Iterate over entries from front to back, along with their offsets
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Offset, &T)> + '_ {
        self.entries.iter().map(|(off, elem)| (*off, elem))
    }
}

impl<A: PartialEq> PartialEq for OffsetVec<A> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<A: Eq> Eq for OffsetVec<A> {}

impl<A: Width> Default for OffsetVec<A> {
    fn default() -> Self {
        OffsetVec::new()
    }
}

impl<T: Debug> Debug for OffsetVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.debug_map()
            .entries(self.entries.iter().map(|(off, elem)| (off.0, elem)))
            .finish()
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum OffsetResult<'a, T> {
    /// Element was accessed
    Ok(usize, &'a T),

    /// Offset was invalid, and falls in the middle of the element at this index
    InvalidOffset(usize),

    /// Offset is too big
    TooLarge,
}

impl<'a, T> OffsetResult<'a, T> {
    /// Convert to an `Option` and keep only the value found
    pub fn ok(&self) -> Option<&'a T> {
        match self {
            OffsetResult::Ok(_, found) => Some(*found),
            OffsetResult::InvalidOffset(_) | OffsetResult::TooLarge => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Slot {
        Narrow(u8),
        Wide(u8),
    }

    impl Width for Slot {
        fn width(&self) -> usize {
            match self {
                Slot::Narrow(_) => 1,
                Slot::Wide(_) => 2,
            }
        }
    }

    #[test]
    fn wide_entries_skip_offsets() {
        let mut slots: OffsetVec<Slot> = OffsetVec::new_starting_at(Offset(1));
        assert_eq!(slots.push(Slot::Narrow(0)), Offset(1));
        assert_eq!(slots.push(Slot::Wide(1)), Offset(2));
        assert_eq!(slots.push(Slot::Narrow(2)), Offset(4));
        assert_eq!(slots.offset_len(), Offset(5));
        assert_eq!(slots.total_width(), 4);

        assert_eq!(slots.get_offset(Offset(2)).ok(), Some(&Slot::Wide(1)));
        assert_eq!(slots.get_offset(Offset(3)), OffsetResult::InvalidOffset(2));
        assert_eq!(slots.get_offset(Offset(5)), OffsetResult::TooLarge);
    }

    #[test]
    fn pop_and_clear_restore_offsets() {
        let mut slots = OffsetVec::new();
        slots.push(Slot::Wide(0));
        slots.push(Slot::Narrow(1));
        assert_eq!(slots.offset_len(), Offset(3));

        assert_eq!(slots.pop(), Some((Offset(2), Slot::Narrow(1))));
        assert_eq!(slots.offset_len(), Offset(2));
        assert_eq!(slots.last(), Some(&Slot::Wide(0)));

        slots.clear();
        assert!(slots.is_empty());
        assert_eq!(slots.offset_len(), Offset(0));
    }
}
