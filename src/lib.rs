//! Lending library registry.
//!
//! This crate models a library with a bounded catalog of books and a bounded
//! roster of patrons. Books are lent under a fixed set of guards (valid ids,
//! availability, enjoyment, per-patron borrow limit) and patrons can ask for the
//! available book they would score highest.
//!
//! ```
//! use lending_library::{Book, BookKey, Library, LiteraryValues, Patron, PatronKey, Tendencies};
//!
//! let mut library = Library::new(2, 1, 2);
//! let book = library
//!     .add_book(Book::new(BookKey::new("a"), "A", "Anon", LiteraryValues::new(3, 0, 0)))
//!     .unwrap();
//! let patron = library
//!     .register_patron(Patron::new(PatronKey::new("p"), "Pat", "Ron", Tendencies::new(2, 0, 0), 5))
//!     .unwrap();
//!
//! assert_eq!(library.suggest_book_id(patron), Some(book));
//! assert!(library.borrow_book(book, patron));
//! assert!(!library.is_book_available(book));
//! ```

pub mod book;
pub mod book_state;
pub mod config;
pub mod events;
pub mod ids;
pub mod library;
pub mod observers;
pub mod patron;
pub mod report;
pub mod slots;

pub use book::{Book, BookKey, LiteraryValues};
pub use book_state::BookState;
pub use config::{CatalogFile, ConfigError, LibraryConfig, SuggestionScope};
pub use events::LoanEvent;
pub use ids::{BookId, PatronId};
pub use library::{Library, LibraryError};
pub use observers::{LoanObserver, TransitionLogger};
pub use patron::{Patron, PatronKey, Tendencies};
pub use report::LibraryReport;
