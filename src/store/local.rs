//! An entry store backed by a JSON key-value document on disk.
//!
//! The document is a JSON object mapping keys to values, like a browser's
//! local storage, with the entries kept as an array under [ENTRIES_KEY].
//! Other keys in the document are left untouched.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};

use crate::{
    Error,
    entry::{BudgetEntry, EntryId, EntryUpdate, NewEntry, Status},
    store::EntryStore,
};

/// The key the entries are stored under.
pub const ENTRIES_KEY: &str = "budgetEntries";

/// Keeps budget entries in a JSON file.
///
/// The file is read on every call and rewritten after every mutation, so the
/// store always reflects what is on disk. A missing file is treated as an
/// empty collection.
#[derive(Debug, Clone)]
pub struct LocalEntryStore {
    path: PathBuf,
}

impl LocalEntryStore {
    /// Create a store that reads and writes the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>, Error> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(error) => return Err(self.unavailable("read", error)),
        };

        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&text).map_err(|error| self.unavailable("parse", error))
    }

    fn read_entries(&self) -> Result<Vec<BudgetEntry>, Error> {
        let mut document = self.read_document()?;

        match document.remove(ENTRIES_KEY) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => {
                serde_json::from_value(value).map_err(|error| self.unavailable("parse", error))
            }
        }
    }

    fn write_entries(&self, entries: &[BudgetEntry]) -> Result<(), Error> {
        let mut document = self.read_document()?;
        let entries =
            serde_json::to_value(entries).map_err(|error| self.unavailable("serialize", error))?;
        document.insert(ENTRIES_KEY.to_owned(), entries);

        let text = serde_json::to_string_pretty(&document)
            .map_err(|error| self.unavailable("serialize", error))?;

        fs::write(&self.path, text).map_err(|error| self.unavailable("write", error))
    }

    /// Apply `change` to the entry with ID `id` and save the collection.
    fn modify(
        &self,
        id: EntryId,
        change: impl FnOnce(BudgetEntry) -> BudgetEntry,
    ) -> Result<BudgetEntry, Error> {
        let mut entries = self.read_entries()?;

        let position = entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(Error::NotFound)?;

        let updated = change(entries[position].clone());
        entries[position] = updated.clone();
        self.write_entries(&entries)?;

        Ok(updated)
    }

    fn unavailable(&self, action: &str, error: impl std::fmt::Display) -> Error {
        tracing::error!("could not {action} the entry document {:?}: {error}", self.path);

        Error::StoreUnavailable(format!(
            "could not {action} {}: {error}",
            self.path.display()
        ))
    }
}

impl EntryStore for LocalEntryStore {
    fn list(&self) -> Result<Vec<BudgetEntry>, Error> {
        self.read_entries()
    }

    fn get(&self, id: EntryId) -> Result<BudgetEntry, Error> {
        self.read_entries()?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or(Error::NotFound)
    }

    fn create(&mut self, entry: NewEntry) -> Result<BudgetEntry, Error> {
        let mut entries = self.read_entries()?;

        let id = entries.iter().map(|entry| entry.id).max().unwrap_or(0) + 1;
        let entry = entry.into_entry(id);
        entries.push(entry.clone());
        self.write_entries(&entries)?;

        Ok(entry)
    }

    fn update(&mut self, id: EntryId, update: EntryUpdate) -> Result<BudgetEntry, Error> {
        self.modify(id, |entry| update.apply_to(entry))
    }

    fn set_status(&mut self, id: EntryId, status: Option<Status>) -> Result<BudgetEntry, Error> {
        self.modify(id, |entry| BudgetEntry { status, ..entry })
    }

    fn delete(&mut self, id: EntryId) -> Result<(), Error> {
        let mut entries = self.read_entries()?;
        let count_before = entries.len();

        entries.retain(|entry| entry.id != id);

        if entries.len() == count_before {
            return Err(Error::NotFound);
        }

        self.write_entries(&entries)
    }
}
