//! Phantom-tagged slot handles.
//!
//! Books and patrons live in separate slot spaces. `SlotId<T>` wraps the raw
//! slot index and carries a tag type so a `BookId` can never be passed where a
//! `PatronId` is expected.
//!
//! ```rust
//! use lending_library::ids::{BookId, PatronId};
//!
//! let book = BookId::new(3);
//! assert_eq!(book.get(), 3);
//! assert_eq!(format!("{book}"), "BookId(3)");
//! assert_eq!(format!("{}", PatronId::new(0)), "PatronId(0)");
//! ```

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Names a slot space for `Debug`/`Display` output.
pub trait SlotTag: Clone {
    /// Human-readable name of the id type.
    const NAME: &'static str;
}

/// An index into a fixed-capacity slot table, tagged with its slot space.
///
/// Any `usize` can be wrapped; whether the slot is occupied is for the owning
/// table to decide. The tag is a pure marker, so every id is `Copy`, comparable
/// and hashable whatever traits the tag type carries.
pub struct SlotId<T> {
    /// Raw slot index.
    index: usize,
    /// Slot space marker.
    _marker: PhantomData<T>,
}

impl<T> SlotId<T> {
    /// Wraps a raw slot index.
    #[inline]
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index, _marker: PhantomData }
    }

    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> Clone for SlotId<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SlotId<T> {}

impl<T> PartialEq for SlotId<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for SlotId<T> {}

impl<T> PartialOrd for SlotId<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for SlotId<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }
}

impl<T> Hash for SlotId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T: SlotTag> fmt::Debug for SlotId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T: SlotTag> fmt::Display for SlotId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for SlotId<T> {
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

/// Tag for the book slot space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct BookTag;

impl SlotTag for BookTag {
    const NAME: &'static str = "BookId";
}

/// Tag for the patron slot space.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PatronTag;

impl SlotTag for PatronTag {
    const NAME: &'static str = "PatronId";
}

/// Id of a book registered in a [`crate::Library`].
pub type BookId = SlotId<BookTag>;

/// Id of a patron registered in a [`crate::Library`].
pub type PatronId = SlotId<PatronTag>;

#[cfg(test)]
mod tests {
    #![allow(clippy::missing_docs_in_private_items)]

    use std::collections::HashSet;

    use super::{BookId, PatronId, SlotId};

    #[test]
    fn test_display_names_slot_space() {
        assert_eq!(BookId::new(7).to_string(), "BookId(7)");
        assert_eq!(format!("{:?}", PatronId::new(2)), "PatronId(2)");
    }

    #[test]
    fn test_ordering_follows_index() {
        assert!(BookId::new(1) < BookId::new(2));
        assert_eq!(PatronId::from(4), PatronId::new(4));
    }

    /// A tag with no traits of its own
    enum Bare {}

    #[test]
    fn test_ids_are_copy_without_tag_traits() {
        let id: SlotId<Bare> = SlotId::new(5);
        let copy = id;
        assert!(id == copy);
        assert!(SlotId::<Bare>::new(1) < id);

        let set: HashSet<SlotId<Bare>> = [id, copy, SlotId::new(6)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
