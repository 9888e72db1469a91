use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{book_state::BookState, ids::PatronId};

/// Caller-supplied stable catalog key (ISBN, shelf mark, ...)
///
/// Registration treats two books with the same key as the same book, no matter
/// what their other attributes say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BookKey(String);

impl BookKey {
    /// Wrap a catalog key
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Literary values a book carries, one per aspect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct LiteraryValues {
    /// How funny the book is
    pub comic: u32,
    /// How dramatic the book is
    pub dramatic: u32,
    /// How educational the book is
    pub educational: u32,
}

impl LiteraryValues {
    /// Bundle the three literary values
    #[must_use]
    pub const fn new(comic: u32, dramatic: u32, educational: u32) -> Self {
        Self { comic, dramatic, educational }
    }
}

/// A catalogued book
///
/// Everything except the borrower is fixed at construction. The borrower is
/// only changed by the owning [`crate::Library`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Stable identity used for duplicate detection
    key: BookKey,
    /// Display title
    title: String,
    /// Display author
    author: String,
    /// Literary values patrons score against
    values: LiteraryValues,
    /// Current borrower, `None` while on the shelf
    #[serde(skip)]
    borrower: Option<PatronId>,
}

impl Book {
    /// Create a book that is not borrowed by anyone
    #[must_use]
    pub fn new(
        key: BookKey,
        title: impl Into<String>,
        author: impl Into<String>,
        values: LiteraryValues,
    ) -> Self {
        Self { key, title: title.into(), author: author.into(), values, borrower: None }
    }

    /// Catalog key
    #[must_use]
    pub fn key(&self) -> &BookKey {
        &self.key
    }

    /// Title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Literary values
    #[must_use]
    pub fn values(&self) -> LiteraryValues {
        self.values
    }

    /// Current borrower, or `None` if the book is available
    #[must_use]
    pub fn borrower_id(&self) -> Option<PatronId> {
        self.borrower
    }

    /// Lending state derived from the borrower field
    #[must_use]
    pub fn state(&self) -> BookState {
        BookState::from(self.borrower)
    }

    /// Set or clear the borrower. No validation happens here.
    pub(crate) fn set_borrower(&mut self, borrower: Option<PatronId>) {
        self.borrower = borrower;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {} [{}]", self.title, self.author, self.key)
    }
}
