use std::fmt;

use crate::ids::PatronId;

/// Lending state of a catalogued book
///
/// Books cycle `Available -> Borrowed -> Available`; returning is the only way back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum BookState {
    /// Book is on the shelf and may be borrowed
    #[default]
    Available,
    /// Book is on loan to a patron
    Borrowed(PatronId),
}

impl BookState {
    /// Get a human-readable description of the state
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Available => "Book is available for borrowing".to_string(),
            Self::Borrowed(patron) => format!("Book is borrowed by {patron}"),
        }
    }

    /// Returns true if the book is on the shelf
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl From<Option<PatronId>> for BookState {
    fn from(borrower: Option<PatronId>) -> Self {
        borrower.map_or(Self::Available, Self::Borrowed)
    }
}

impl fmt::Display for BookState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Borrowed(patron) => write!(f, "borrowed by {patron}"),
        }
    }
}
