use std::fmt;

use thiserror::Error;

use crate::{
    book::{Book, BookKey},
    config::{LibraryConfig, SuggestionScope},
    events::LoanEvent,
    ids::{BookId, BookTag, PatronId, PatronTag},
    observers::LoanObserver,
    patron::{Patron, PatronKey},
    slots::{Claim, SlotTable},
};

/// Reasons a library operation did not go through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LibraryError {
    /// Every book slot is taken by a different book
    #[error("book catalog is full ({capacity} slots)")]
    BookCapacityExhausted {
        /// Number of book slots
        capacity: usize,
    },
    /// Every patron slot is taken by a different patron
    #[error("patron roster is full ({capacity} slots)")]
    PatronCapacityExhausted {
        /// Number of patron slots
        capacity: usize,
    },
    /// The id is out of range or names an empty slot
    #[error("{0} does not name a registered book")]
    UnknownBook(BookId),
    /// The id is out of range or names an empty slot
    #[error("{0} does not name a registered patron")]
    UnknownPatron(PatronId),
    /// The book is already on loan
    #[error("{book} is already borrowed by {borrower}")]
    BookUnavailable {
        /// Requested book
        book: BookId,
        /// Current holder
        borrower: PatronId,
    },
    /// The patron's score for the book is below their threshold
    #[error("{patron} would not enjoy {book} (score {score}, threshold {threshold})")]
    NotEnjoyed {
        /// Requested book
        book: BookId,
        /// Requesting patron
        patron: PatronId,
        /// The patron's score for the book
        score: i64,
        /// The patron's enjoyment threshold
        threshold: i64,
    },
    /// The patron already holds the maximum number of books
    #[error("{patron} already holds {limit} books")]
    BorrowLimitReached {
        /// Requesting patron
        patron: PatronId,
        /// Per-patron borrow limit
        limit: usize,
    },
}

/// A lending library: a bounded catalog, a bounded roster and the rules
/// connecting them.
///
/// Every mutation takes `&mut self`; there is no internal locking, so sharing a
/// library across threads requires an external lock.
pub struct Library {
    /// Per-patron ceiling on concurrent borrows
    max_borrowed_books: usize,
    /// Scan window used by `suggest_book`
    suggestion_scope: SuggestionScope,
    /// Book slots
    books: SlotTable<Book, BookTag>,
    /// Patron slots
    patrons: SlotTable<Patron, PatronTag>,
    /// Notified after every borrow and return
    observers: Vec<Box<dyn LoanObserver>>,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("max_borrowed_books", &self.max_borrowed_books)
            .field("suggestion_scope", &self.suggestion_scope)
            .field("books", &self.books)
            .field("patrons", &self.patrons)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Library {
    /// Create an empty library with the given capacities
    #[must_use]
    pub fn new(max_book_capacity: usize, max_borrowed_books: usize, max_patron_capacity: usize) -> Self {
        Self::with_config(LibraryConfig::new(
            max_book_capacity,
            max_borrowed_books,
            max_patron_capacity,
        ))
    }

    /// Create an empty library from a configuration
    #[must_use]
    pub fn with_config(config: LibraryConfig) -> Self {
        Self {
            max_borrowed_books: config.max_borrowed_books,
            suggestion_scope: config.suggestion_scope,
            books: SlotTable::new(config.max_book_capacity),
            patrons: SlotTable::new(config.max_patron_capacity),
            observers: Vec::new(),
        }
    }

    /// The configuration this library was built with
    #[must_use]
    pub fn config(&self) -> LibraryConfig {
        LibraryConfig {
            max_book_capacity: self.books.capacity(),
            max_borrowed_books: self.max_borrowed_books,
            max_patron_capacity: self.patrons.capacity(),
            suggestion_scope: self.suggestion_scope,
        }
    }

    /// Number of book slots
    #[must_use]
    pub fn max_book_capacity(&self) -> usize {
        self.books.capacity()
    }

    /// Per-patron ceiling on concurrent borrows
    #[must_use]
    pub fn max_borrowed_books(&self) -> usize {
        self.max_borrowed_books
    }

    /// Number of patron slots
    #[must_use]
    pub fn max_patron_capacity(&self) -> usize {
        self.patrons.capacity()
    }

    /// Register an observer to be notified of loans and returns
    pub fn register_observer(&mut self, observer: Box<dyn LoanObserver>) {
        self.observers.push(observer);
    }

    // ------------------------------------------------------------------
    // Books
    // ------------------------------------------------------------------

    /// Add a book to the catalog, or return its id if a book with the same key
    /// is already catalogued
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::BookCapacityExhausted` if the book is new and
    /// every slot is taken. No slot changes in that case.
    pub fn add_book(&mut self, book: Book) -> Result<BookId, LibraryError> {
        match self.books.claim(book, |held, new| held.key() == new.key()) {
            Some(Claim::Inserted(id)) => {
                tracing::debug!(book = %id, "book added to catalog");
                Ok(id)
            }
            Some(Claim::Existing(id)) => Ok(id),
            None => {
                let capacity = self.books.capacity();
                tracing::warn!(capacity, "book catalog is full");
                Err(LibraryError::BookCapacityExhausted { capacity })
            }
        }
    }

    /// Id of the catalogued book with this key
    ///
    /// The scan stops at the first empty slot.
    #[must_use]
    pub fn book_id(&self, key: &BookKey) -> Option<BookId> {
        self.books.position(|book| book.key() == key)
    }

    /// True iff `id` is in range and names an occupied slot
    #[must_use]
    pub fn is_book_id_valid(&self, id: BookId) -> bool {
        self.books.is_occupied(id)
    }

    /// True iff `id` is valid and nobody is borrowing the book
    #[must_use]
    pub fn is_book_available(&self, id: BookId) -> bool {
        self.books.get(id).is_some_and(|book| book.borrower_id().is_none())
    }

    /// The book in slot `id`
    #[must_use]
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(id)
    }

    /// All catalogued books in slot order
    pub fn books(&self) -> impl Iterator<Item = (BookId, &Book)> {
        self.books.iter()
    }

    // ------------------------------------------------------------------
    // Patrons
    // ------------------------------------------------------------------

    /// Register a patron, or return their id if a patron with the same key is
    /// already registered
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::PatronCapacityExhausted` if the patron is new and
    /// every slot is taken.
    pub fn register_patron(&mut self, patron: Patron) -> Result<PatronId, LibraryError> {
        match self.patrons.claim(patron, |held, new| held.key() == new.key()) {
            Some(Claim::Inserted(id)) => {
                tracing::debug!(patron = %id, "patron registered");
                Ok(id)
            }
            Some(Claim::Existing(id)) => Ok(id),
            None => {
                let capacity = self.patrons.capacity();
                tracing::warn!(capacity, "patron roster is full");
                Err(LibraryError::PatronCapacityExhausted { capacity })
            }
        }
    }

    /// Id of the registered patron with this key
    #[must_use]
    pub fn patron_id(&self, key: &PatronKey) -> Option<PatronId> {
        self.patrons.position(|patron| patron.key() == key)
    }

    /// True iff `id` is in range and names an occupied slot
    #[must_use]
    pub fn is_patron_id_valid(&self, id: PatronId) -> bool {
        self.patrons.is_occupied(id)
    }

    /// The patron in slot `id`
    #[must_use]
    pub fn patron(&self, id: PatronId) -> Option<&Patron> {
        self.patrons.get(id)
    }

    /// All registered patrons in slot order
    pub fn patrons(&self) -> impl Iterator<Item = (PatronId, &Patron)> {
        self.patrons.iter()
    }

    // ------------------------------------------------------------------
    // Loans
    // ------------------------------------------------------------------

    /// Number of books currently borrowed by `patron`
    ///
    /// Recounted from the catalog on every call.
    #[must_use]
    pub fn borrowed_count(&self, patron: PatronId) -> usize {
        self.books.iter().filter(|(_, book)| book.borrower_id() == Some(patron)).count()
    }

    /// Number of books currently on loan to anyone
    #[must_use]
    pub fn books_on_loan(&self) -> usize {
        self.books.iter().filter(|(_, book)| book.borrower_id().is_some()).count()
    }

    /// Lend `book_id` to `patron_id`
    ///
    /// # Errors
    ///
    /// The first failing guard, checked in this order:
    /// - `UnknownBook` / `UnknownPatron` if either id is invalid
    /// - `BookUnavailable` if the book is already borrowed
    /// - `NotEnjoyed` if the patron's score is below their threshold
    /// - `BorrowLimitReached` if the patron already holds `max_borrowed_books`
    ///
    /// Nothing changes unless every guard passes.
    pub fn try_borrow_book(&mut self, book_id: BookId, patron_id: PatronId) -> Result<(), LibraryError> {
        if let Err(reason) = self.check_borrow(book_id, patron_id) {
            tracing::debug!(book = %book_id, patron = %patron_id, %reason, "borrow refused");
            return Err(reason);
        }

        let book = self.books.get_mut(book_id).ok_or(LibraryError::UnknownBook(book_id))?;
        book.set_borrower(Some(patron_id));
        self.notify(&LoanEvent::Borrowed { book: book_id, patron: patron_id });
        Ok(())
    }

    /// Lend `book_id` to `patron_id`, reporting only whether it worked
    pub fn borrow_book(&mut self, book_id: BookId, patron_id: PatronId) -> bool {
        self.try_borrow_book(book_id, patron_id).is_ok()
    }

    /// Put a book back on the shelf and return who had it
    ///
    /// Returning a book that is already available is a no-op that yields `None`.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::UnknownBook` if `book_id` is invalid; nothing
    /// changes in that case.
    pub fn return_book(&mut self, book_id: BookId) -> Result<Option<PatronId>, LibraryError> {
        let book = self.books.get_mut(book_id).ok_or(LibraryError::UnknownBook(book_id))?;
        let previous = book.borrower_id();
        book.set_borrower(None);

        if let Some(patron) = previous {
            self.notify(&LoanEvent::Returned { book: book_id, patron });
        }
        Ok(previous)
    }

    // ------------------------------------------------------------------
    // Suggestions
    // ------------------------------------------------------------------

    /// The available book `patron_id` would enjoy most
    #[must_use]
    pub fn suggest_book(&self, patron_id: PatronId) -> Option<&Book> {
        self.suggest_book_id(patron_id).and_then(|id| self.books.get(id))
    }

    /// Id of the available book `patron_id` would enjoy most
    ///
    /// Candidates must be available, enjoyable and inside the scan window.
    /// Only a strictly positive score qualifies, and ties go to the lowest
    /// slot. Under `SuggestionScope::BorrowLimit` the window is the first
    /// `max_borrowed_books` slots; under `Catalog` it is every slot.
    ///
    /// Returns `None` for an invalid patron id.
    #[must_use]
    pub fn suggest_book_id(&self, patron_id: PatronId) -> Option<BookId> {
        let patron = self.patrons.get(patron_id)?;
        let window = match self.suggestion_scope {
            SuggestionScope::BorrowLimit => self.max_borrowed_books,
            SuggestionScope::Catalog => self.books.capacity(),
        };

        let mut best: Option<(BookId, i64)> = None;
        for (id, book) in self.books.iter().take(window) {
            if book.borrower_id().is_some() || !patron.will_enjoy(book) {
                continue;
            }
            let score = patron.score(book);
            if score > best.map_or(0, |(_, best_score)| best_score) {
                best = Some((id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Run every guard of `try_borrow_book` without mutating anything
    fn check_borrow(&self, book_id: BookId, patron_id: PatronId) -> Result<(), LibraryError> {
        let book = self.books.get(book_id).ok_or(LibraryError::UnknownBook(book_id))?;
        let patron = self.patrons.get(patron_id).ok_or(LibraryError::UnknownPatron(patron_id))?;

        if let Some(borrower) = book.borrower_id() {
            return Err(LibraryError::BookUnavailable { book: book_id, borrower });
        }
        if !patron.will_enjoy(book) {
            return Err(LibraryError::NotEnjoyed {
                book: book_id,
                patron: patron_id,
                score: patron.score(book),
                threshold: patron.enjoyment_threshold(),
            });
        }
        if self.borrowed_count(patron_id) >= self.max_borrowed_books {
            return Err(LibraryError::BorrowLimitReached {
                patron: patron_id,
                limit: self.max_borrowed_books,
            });
        }
        Ok(())
    }

    /// Tell every observer about a loan transition
    fn notify(&self, event: &LoanEvent) {
        for observer in &self.observers {
            observer.on_loan_event(event);
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} books, {}/{} patrons, {} on loan",
            self.books.len(),
            self.books.capacity(),
            self.patrons.len(),
            self.patrons.capacity(),
            self.books_on_loan()
        )
    }
}
