//! # Fixed-Capacity Slot Tables
//!
//! A `SlotTable` is an append-only arena with a hard capacity. Entries are
//! never removed, so the occupied slots always form the prefix `[0, len)`:
//! the first empty slot is always `len`, and a scan can stop there.
//!
//! ```
//! use lending_library::ids::BookTag;
//! use lending_library::slots::{Claim, SlotTable};
//!
//! let mut table: SlotTable<&str, BookTag> = SlotTable::new(2);
//! let first = table.claim("a", |held, new| held == new);
//! assert!(matches!(first, Some(Claim::Inserted(id)) if id.get() == 0));
//! let again = table.claim("a", |held, new| held == new);
//! assert!(matches!(again, Some(Claim::Existing(id)) if id.get() == 0));
//! ```

use std::{fmt, marker::PhantomData};

use crate::ids::{SlotId, SlotTag};

/// Outcome of [`SlotTable::claim`].
pub enum Claim<Tag> {
    /// A matching entry already held this slot; the offered value was dropped.
    Existing(SlotId<Tag>),
    /// The offered value was placed in the first empty slot.
    Inserted(SlotId<Tag>),
}

impl<Tag> Claim<Tag> {
    /// The slot the value ended up in, whether new or pre-existing.
    #[must_use]
    pub fn id(self) -> SlotId<Tag> {
        match self {
            Self::Existing(id) | Self::Inserted(id) => id,
        }
    }
}

impl<Tag> Clone for Claim<Tag> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Tag> Copy for Claim<Tag> {}

impl<Tag> PartialEq for Claim<Tag> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Existing(a), Self::Existing(b)) | (Self::Inserted(a), Self::Inserted(b)) => {
                a == b
            }
            _ => false,
        }
    }
}

impl<Tag> Eq for Claim<Tag> {}

impl<Tag: SlotTag> fmt::Debug for Claim<Tag> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(id) => f.debug_tuple("Existing").field(id).finish(),
            Self::Inserted(id) => f.debug_tuple("Inserted").field(id).finish(),
        }
    }
}

/// A dense, append-only table capped at a fixed number of slots.
#[derive(Debug, Clone)]
pub struct SlotTable<T, Tag> {
    /// Occupied slots, in slot order.
    entries: Vec<T>,
    /// Hard upper bound on `entries.len()`.
    capacity: usize,
    /// Slot space marker.
    _tag: PhantomData<Tag>,
}

impl<T, Tag> SlotTable<T, Tag> {
    /// Creates an empty table with `capacity` slots.
    ///
    /// A zero capacity yields a table that is always full.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { entries: Vec::new(), capacity, _tag: PhantomData }
    }

    /// Total number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Returns true iff `id` is within capacity and its slot is occupied.
    #[must_use]
    pub fn is_occupied(&self, id: SlotId<Tag>) -> bool {
        id.get() < self.capacity && id.get() < self.entries.len()
    }

    /// Finds the slot holding an entry that `same` considers identical to
    /// `value`, or places `value` in the first empty slot.
    ///
    /// Returns `None` when there is neither a match nor a free slot; the table
    /// is left untouched in that case.
    pub fn claim(&mut self, value: T, same: impl Fn(&T, &T) -> bool) -> Option<Claim<Tag>> {
        if let Some(index) = self.entries.iter().position(|held| same(held, &value)) {
            return Some(Claim::Existing(SlotId::new(index)));
        }
        if self.is_full() {
            return None;
        }
        let index = self.entries.len();
        self.entries.push(value);
        Some(Claim::Inserted(SlotId::new(index)))
    }

    /// Returns the id of the first occupied slot matching `predicate`.
    ///
    /// The scan ends at the first empty slot.
    pub fn position(&self, predicate: impl Fn(&T) -> bool) -> Option<SlotId<Tag>> {
        self.entries.iter().position(predicate).map(SlotId::new)
    }

    /// Returns the entry in slot `id`, if occupied.
    #[must_use]
    pub fn get(&self, id: SlotId<Tag>) -> Option<&T> {
        self.entries.get(id.get())
    }

    /// Returns the entry in slot `id` mutably, if occupied.
    #[must_use]
    pub fn get_mut(&mut self, id: SlotId<Tag>) -> Option<&mut T> {
        self.entries.get_mut(id.get())
    }

    /// Iterates over occupied slots in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId<Tag>, &T)> {
        self.entries.iter().enumerate().map(|(index, entry)| (SlotId::new(index), entry))
    }
}
