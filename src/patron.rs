use std::fmt;

use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Caller-supplied stable patron key, typically a library card number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct PatronKey(String);

impl PatronKey {
    /// Wrap a patron key
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

impl fmt::Display for PatronKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weights a patron assigns to each literary aspect
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Tendencies {
    /// Weight of the comic aspect
    pub comic: i32,
    /// Weight of the dramatic aspect
    pub dramatic: i32,
    /// Weight of the educational aspect
    pub educational: i32,
}

impl Tendencies {
    /// Bundle the three weights
    #[must_use]
    pub const fn new(comic: i32, dramatic: i32, educational: i32) -> Self {
        Self { comic, dramatic, educational }
    }
}

/// A library patron with literary preferences
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Patron {
    /// Stable identity used for duplicate detection
    key: PatronKey,
    /// First name
    first_name: String,
    /// Last name
    last_name: String,
    /// Per-aspect weights
    tendencies: Tendencies,
    /// Minimal score a book needs for this patron to enjoy it
    enjoyment_threshold: i64,
}

impl Patron {
    /// Create a patron
    #[must_use]
    pub fn new(
        key: PatronKey,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        tendencies: Tendencies,
        enjoyment_threshold: i64,
    ) -> Self {
        Self {
            key,
            first_name: first_name.into(),
            last_name: last_name.into(),
            tendencies,
            enjoyment_threshold,
        }
    }

    /// Patron key
    #[must_use]
    pub fn key(&self) -> &PatronKey {
        &self.key
    }

    /// First name
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Last name
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Per-aspect weights
    #[must_use]
    pub fn tendencies(&self) -> Tendencies {
        self.tendencies
    }

    /// Enjoyment threshold
    #[must_use]
    pub fn enjoyment_threshold(&self) -> i64 {
        self.enjoyment_threshold
    }

    /// First and last name separated by a single space
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Literary value this patron assigns to `book`
    ///
    /// The weighted sum is computed in `i64` and saturates at the type bounds.
    #[must_use]
    pub fn score(&self, book: &Book) -> i64 {
        let values = book.values();
        let weighted = |value: u32, weight: i32| i64::from(value).saturating_mul(i64::from(weight));
        weighted(values.comic, self.tendencies.comic)
            .saturating_add(weighted(values.dramatic, self.tendencies.dramatic))
            .saturating_add(weighted(values.educational, self.tendencies.educational))
    }

    /// True iff the score reaches the enjoyment threshold (inclusive)
    #[must_use]
    pub fn will_enjoy(&self, book: &Book) -> bool {
        self.score(book) >= self.enjoyment_threshold
    }
}

impl fmt::Display for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
