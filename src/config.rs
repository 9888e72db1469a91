//! Library configuration and seed catalogs.
//!
//! Configuration is plain JSON read through `serde_json`:
//!
//! ```json
//! {
//!   "library": { "max_book_capacity": 2, "max_borrowed_books": 1, "max_patron_capacity": 2 },
//!   "books": [ { "key": "a", "title": "A", "author": "X",
//!                "values": { "comic": 3, "dramatic": 0, "educational": 0 } } ],
//!   "patrons": [ { "key": "p", "first_name": "Pat", "last_name": "Ron",
//!                  "tendencies": { "comic": 2, "dramatic": 0, "educational": 0 },
//!                  "enjoyment_threshold": 5 } ]
//! }
//! ```

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    book::Book,
    library::{Library, LibraryError},
    patron::Patron,
};

/// Errors raised while loading or checking configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The contents are not valid configuration JSON
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// The configuration parses but cannot lend anything
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Which book slots `suggest_book` considers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionScope {
    /// Only slots below `max_borrowed_books`
    #[default]
    BorrowLimit,
    /// Every occupied slot
    Catalog,
}

/// Capacities and policies of a library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Number of book slots
    pub max_book_capacity: usize,
    /// Books a single patron may hold at once
    pub max_borrowed_books: usize,
    /// Number of patron slots
    pub max_patron_capacity: usize,
    /// Scan window for suggestions
    pub suggestion_scope: SuggestionScope,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            max_book_capacity: 100,
            max_borrowed_books: 3,
            max_patron_capacity: 50,
            suggestion_scope: SuggestionScope::default(),
        }
    }
}

impl LibraryConfig {
    /// Configuration with the given capacities and the default suggestion scope
    #[must_use]
    pub fn new(max_book_capacity: usize, max_borrowed_books: usize, max_patron_capacity: usize) -> Self {
        Self {
            max_book_capacity,
            max_borrowed_books,
            max_patron_capacity,
            suggestion_scope: SuggestionScope::default(),
        }
    }

    /// Replace the suggestion scope
    #[must_use]
    pub fn with_suggestion_scope(mut self, scope: SuggestionScope) -> Self {
        self.suggestion_scope = scope;
        self
    }

    /// Parse a configuration from JSON
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or unknown fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read_file(path.as_ref())?)
    }

    /// Reject configurations under which no book could ever be lent.
    ///
    /// `Library` accepts these as-is; this is for callers that want to fail early.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming every zero capacity or limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        if self.max_book_capacity == 0 {
            problems.push("max_book_capacity is 0");
        }
        if self.max_patron_capacity == 0 {
            problems.push("max_patron_capacity is 0");
        }
        if self.max_borrowed_books == 0 {
            problems.push("max_borrowed_books is 0");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join(", ")))
        }
    }
}

/// A configuration plus the books and patrons to register at startup
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Library capacities and policies
    #[serde(default)]
    pub library: LibraryConfig,
    /// Books, registered in order
    #[serde(default)]
    pub books: Vec<Book>,
    /// Patrons, registered in order
    #[serde(default)]
    pub patrons: Vec<Patron>,
}

impl CatalogFile {
    /// Parse a catalog from JSON
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON, unknown fields or
    /// entries missing a required field.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are not a valid catalog.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading catalog");
        Self::from_json_str(&read_file(path)?)
    }

    /// Register every book and patron into a fresh library.
    ///
    /// Registration failures do not stop the build; they are returned alongside
    /// the library in the order they happened.
    #[must_use]
    pub fn build(self) -> (Library, Vec<LibraryError>) {
        let mut library = Library::with_config(self.library);
        let mut failures = Vec::new();
        for book in self.books {
            if let Err(err) = library.add_book(book) {
                failures.push(err);
            }
        }
        for patron in self.patrons {
            if let Err(err) = library.register_patron(patron) {
                failures.push(err);
            }
        }
        (library, failures)
    }
}

/// Read a whole file, keeping the path in the error
fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::panic, clippy::missing_docs_in_private_items)]

    use std::io::Write;

    use super::{CatalogFile, ConfigError, LibraryConfig, SuggestionScope};
    use crate::library::LibraryError;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = LibraryConfig::from_json_str(r#"{ "max_borrowed_books": 5 }"#)
            .expect("partial config should parse");
        assert_eq!(config.max_borrowed_books, 5);
        assert_eq!(config.max_book_capacity, 100);
        assert_eq!(config.max_patron_capacity, 50);
        assert_eq!(config.suggestion_scope, SuggestionScope::BorrowLimit);
    }

    #[test]
    fn test_suggestion_scope_is_snake_case() {
        let config = LibraryConfig::from_json_str(r#"{ "suggestion_scope": "catalog" }"#)
            .expect("scope should parse");
        assert_eq!(config.suggestion_scope, SuggestionScope::Catalog);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = LibraryConfig::from_json_str(r#"{ "max_books": 5 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_lists_every_problem() {
        assert!(LibraryConfig::new(2, 1, 2).validate().is_ok());
        match LibraryConfig::new(0, 0, 1).validate() {
            Err(ConfigError::Invalid(msg)) => {
                assert_eq!(msg, "max_book_capacity is 0, max_borrowed_books is 0");
            }
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        match LibraryConfig::load(&path) {
            Err(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Read error, got {other:?}"),
        }
    }

    #[test]
    fn test_demo_catalog_registers_everything() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/catalog.json");
        let catalog = CatalogFile::load(path).expect("demo catalog should load");
        assert!(catalog.library.validate().is_ok());

        let (library, failures) = catalog.build();
        assert!(failures.is_empty());
        assert_eq!(library.books().count(), 4);
        assert_eq!(library.patrons().count(), 3);
    }

    #[test]
    fn test_catalog_file_builds_library() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{
                "library": {{ "max_book_capacity": 1, "max_borrowed_books": 1, "max_patron_capacity": 2 }},
                "books": [
                    {{ "key": "a", "title": "A", "author": "X",
                       "values": {{ "comic": 3, "dramatic": 0, "educational": 0 }} }},
                    {{ "key": "b", "title": "B", "author": "Y",
                       "values": {{ "comic": 0, "dramatic": 5, "educational": 0 }} }}
                ],
                "patrons": [
                    {{ "key": "p", "first_name": "Pat", "last_name": "Ron",
                       "tendencies": {{ "comic": 2, "dramatic": 0, "educational": 0 }},
                       "enjoyment_threshold": 5 }}
                ]
            }}"#
        )
        .expect("write catalog");

        let catalog = CatalogFile::load(file.path()).expect("catalog should load");
        let (library, failures) = catalog.build();

        assert_eq!(library.books().count(), 1);
        assert_eq!(library.patrons().count(), 1);
        assert_eq!(failures, vec![LibraryError::BookCapacityExhausted { capacity: 1 }]);
    }
}
