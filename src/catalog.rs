// Core catalog module: the `Book` record, the `Catalog` that owns all
// records, and year validation. This layer is deliberately free of any
// terminal concerns -- the UI converts user input to these types and
// renders the results.

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::storage::{Storage, StorageError};

/// Earliest publication year the catalog accepts.
pub const MIN_YEAR: i32 = 1800;

/// Availability state of a book. Stored as a human-readable string so the
/// data file stays greppable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "available")]
    Available,
    #[serde(rename = "checked out")]
    CheckedOut,
}

impl Status {
    /// Convert the shell's numeric selector (`"1"` / `"2"`) into a status.
    /// Any other input is an invalid-input error, distinct from an unknown
    /// book id.
    pub fn from_selector(selector: &str) -> Result<Self, CatalogError> {
        match selector.trim() {
            "1" => Ok(Status::Available),
            "2" => Ok(Status::CheckedOut),
            other => Err(CatalogError::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Available => write!(f, "available"),
            Status::CheckedOut => write!(f, "checked out"),
        }
    }
}

/// One catalog entry. Ids are assigned by the catalog and never change;
/// only `status` is mutable after creation, and only through
/// [`Catalog::change_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: Status,
}

/// Errors reported by catalog operations. Validation and not-found errors
/// never mutate the catalog or touch storage.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("the {0} must not be empty")]
    EmptyField(&'static str),

    #[error("no book with id {0}")]
    NotFound(u64),

    #[error("invalid status {0:?}: enter 1 (available) or 2 (checked out)")]
    InvalidStatus(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from [`validate_year`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum YearError {
    #[error("the year must be a number")]
    NotANumber,

    #[error("the year cannot be earlier than {MIN_YEAR}")]
    TooEarly,

    #[error("the year cannot be later than the current year ({0})")]
    TooLate(i32),
}

/// Validate a year entered as free text. Checks, in order: it parses as an
/// integer, it is not before [`MIN_YEAR`], and it does not lie in the
/// future (against the calendar year at call time). Pure; safe to call in
/// a retry loop.
pub fn validate_year(input: &str) -> Result<i32, YearError> {
    let year: i32 = input.trim().parse().map_err(|_| YearError::NotANumber)?;
    if year < MIN_YEAR {
        return Err(YearError::TooEarly);
    }
    let current = Local::now().year();
    if year > current {
        return Err(YearError::TooLate(current));
    }
    Ok(year)
}

/// The in-memory catalog plus its persistent backend. Every mutating
/// operation saves the whole catalog; if the save fails the in-memory
/// change is rolled back, so memory never gets ahead of disk.
pub struct Catalog<S: Storage> {
    books: Vec<Book>,
    storage: S,
}

impl<S: Storage> Catalog<S> {
    /// Load a catalog from its backend. A missing data file yields an
    /// empty catalog; see [`Storage::load`] for corruption handling.
    pub fn load(storage: S) -> Result<Self, CatalogError> {
        let books = storage.load()?;
        Ok(Catalog { books, storage })
    }

    /// Add a book and return its freshly assigned id. Title and author are
    /// trimmed and must be non-empty. The new book starts as available.
    pub fn add(&mut self, title: &str, author: &str, year: i32) -> Result<u64, CatalogError> {
        let title = title.trim();
        let author = author.trim();
        if title.is_empty() {
            return Err(CatalogError::EmptyField("title"));
        }
        if author.is_empty() {
            return Err(CatalogError::EmptyField("author"));
        }

        // Highest id ever still present, plus one. Ids of removed books can
        // be reissued only if the maximum itself was removed; uniqueness
        // within the catalog always holds.
        let id = self.books.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        self.books.push(Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            year,
            status: Status::Available,
        });

        if let Err(e) = self.storage.save(&self.books) {
            self.books.pop();
            return Err(e.into());
        }
        Ok(id)
    }

    /// Remove the book with the given id. An unknown id is a reported
    /// no-op; nothing is written to storage in that case.
    pub fn remove(&mut self, id: u64) -> Result<(), CatalogError> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let removed = self.books.remove(pos);

        if let Err(e) = self.storage.save(&self.books) {
            self.books.insert(pos, removed);
            return Err(e.into());
        }
        Ok(())
    }

    /// Case-insensitive search: matches when the query is a substring of
    /// the title or author, or equals the decimal year exactly. An empty
    /// result is not an error. Results keep catalog order.
    pub fn search(&self, query: &str) -> Vec<&Book> {
        let q = query.to_lowercase();
        self.books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&q)
                    || b.author.to_lowercase().contains(&q)
                    || q == b.year.to_string()
            })
            .collect()
    }

    /// All books in insertion order. An empty slice means an empty catalog.
    pub fn list(&self) -> &[Book] {
        &self.books
    }

    /// Set the status of the book with the given id and persist. Unknown
    /// ids are reported without mutation.
    pub fn change_status(&mut self, id: u64, status: Status) -> Result<(), CatalogError> {
        let pos = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::NotFound(id))?;
        let previous = self.books[pos].status;
        self.books[pos].status = status;

        if let Err(e) = self.storage.save(&self.books) {
            self.books[pos].status = previous;
            return Err(e.into());
        }
        Ok(())
    }
}
