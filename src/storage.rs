// Persistence layer. The catalog talks to a `Storage` trait so the JSON
// file backend can be swapped out (or replaced with an in-memory one in
// tests) without touching catalog logic.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::catalog::Book;

/// Errors from the persistence layer. Corruption of an existing data file
/// is deliberately absent here: `load` recovers from it (see below) rather
/// than failing the whole application.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },

    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Whole-catalog load/save capability. Implementations always read or
/// replace the complete record set; there are no partial updates.
pub trait Storage {
    fn load(&self) -> Result<Vec<Book>, StorageError>;
    fn save(&self, books: &[Book]) -> Result<(), StorageError>;
}

/// The default backend: one JSON file holding an array of book objects.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move an unreadable data file aside so its contents survive for
    /// manual inspection instead of being overwritten by the next save.
    fn quarantine(&self) -> PathBuf {
        let mut aside = self.path.clone().into_os_string();
        aside.push(".corrupt");
        let aside = PathBuf::from(aside);
        if let Err(e) = fs::rename(&self.path, &aside) {
            warn!(path = %self.path.display(), error = %e, "could not move corrupt data file aside");
        }
        aside
    }
}

impl Storage for JsonFileStorage {
    /// Read every book from the data file. A missing file is an empty
    /// catalog. Content that does not parse as the expected array (bad
    /// JSON, missing keys) is logged, moved aside, and treated as empty;
    /// any other I/O error propagates.
    fn load(&self) -> Result<Vec<Book>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        match serde_json::from_str::<Vec<Book>>(&text) {
            Ok(books) => Ok(books),
            Err(e) => {
                let aside = self.quarantine();
                warn!(
                    path = %self.path.display(),
                    moved_to = %aside.display(),
                    error = %e,
                    "data file is corrupt; starting with an empty catalog"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Write the full record set. The new content goes to a sibling temp
    /// file first and is renamed over the real path, so a crash mid-write
    /// never leaves a half-written catalog behind.
    fn save(&self, books: &[Book]) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(books)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text).map_err(|e| StorageError::Write {
            path: tmp.clone(),
            source: e,
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Status;
    use tempfile::tempdir;

    fn sample_books() -> Vec<Book> {
        vec![
            Book {
                id: 1,
                title: "The Dispossessed".into(),
                author: "Ursula K. Le Guin".into(),
                year: 1974,
                status: Status::Available,
            },
            Book {
                id: 3,
                title: "Roadside Picnic".into(),
                author: "Arkady and Boris Strugatsky".into(),
                year: 1972,
                status: Status::CheckedOut,
            },
        ]
    }

    #[test]
    fn missing_file_loads_empty_without_creating_it() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().unwrap().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn save_then_load_round_trips_ids_fields_and_order() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("library.json"));
        let books = sample_books();
        storage.save(&books).unwrap();
        assert_eq!(storage.load().unwrap(), books);
        // no temp file left behind
        assert!(!dir.path().join("library.tmp").exists());
    }

    #[test]
    fn uses_the_stable_key_names_and_status_strings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        let storage = JsonFileStorage::new(&path);
        storage.save(&sample_books()).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let first = &raw[0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["title"], "The Dispossessed");
        assert_eq!(first["author"], "Ursula K. Le Guin");
        assert_eq!(first["year"], 1974);
        assert_eq!(first["status"], "available");
        assert_eq!(raw[1]["status"], "checked out");
    }

    #[test]
    fn corrupt_file_is_quarantined_and_loads_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        fs::write(&path, "{ not json at all").unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().unwrap().is_empty());
        assert!(!path.exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("library.json.corrupt")).unwrap(),
            "{ not json at all"
        );
    }

    #[test]
    fn missing_required_key_counts_as_corruption() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("library.json");
        // valid JSON, but the record is missing `author`
        fs::write(
            &path,
            r#"[{"id": 1, "title": "Solaris", "year": 1961, "status": "available"}]"#,
        )
        .unwrap();

        let storage = JsonFileStorage::new(&path);
        assert!(storage.load().unwrap().is_empty());
        assert!(dir.path().join("library.json.corrupt").exists());
    }

    #[test]
    fn save_overwrites_previous_content_completely() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("library.json"));
        storage.save(&sample_books()).unwrap();
        storage.save(&sample_books()[..1]).unwrap();
        assert_eq!(storage.load().unwrap(), sample_books()[..1]);
    }
}
