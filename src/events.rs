use crate::ids::{BookId, PatronId};

/// Loan transitions reported to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanEvent {
    /// A patron borrowed a book
    Borrowed {
        /// The book that left the shelf
        book: BookId,
        /// The patron who took it
        patron: PatronId,
    },
    /// A borrowed book came back
    Returned {
        /// The book back on the shelf
        book: BookId,
        /// The patron who had it
        patron: PatronId,
    },
}

impl LoanEvent {
    /// The book involved in the event
    #[must_use]
    pub fn book(&self) -> BookId {
        match self {
            Self::Borrowed { book, .. } | Self::Returned { book, .. } => *book,
        }
    }

    /// The patron involved in the event
    #[must_use]
    pub fn patron(&self) -> PatronId {
        match self {
            Self::Borrowed { patron, .. } | Self::Returned { patron, .. } => *patron,
        }
    }
}
