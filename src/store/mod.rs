//! Persistence for budget entries.
//!
//! The app reads and writes entries through the [EntryStore] trait so that
//! the rest of the code does not care where entries live. Two stores are
//! provided:
//! - [SqliteEntryStore] keeps entries in a SQLite database table.
//! - [LocalEntryStore] keeps entries in a JSON key-value document on disk,
//!   the same shape a browser's local storage would hold.
//!
//! One store is picked at start-up and shared between requests as a
//! [SharedStore].

mod local;
mod sqlite;

use std::sync::{Arc, Mutex, MutexGuard};

pub use local::{ENTRIES_KEY, LocalEntryStore};
pub use sqlite::{SqliteEntryStore, create_entry_table};

use crate::{
    Error,
    entry::{BudgetEntry, EntryId, EntryUpdate, NewEntry, Status},
};

/// CRUD access to the collection of budget entries.
///
/// Every call works on a fresh read of the backing storage, so callers should
/// re-list the entries after a mutation rather than patch a cached copy.
pub trait EntryStore {
    /// Get every entry in insertion order.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the storage cannot be read or parsed.
    fn list(&self) -> Result<Vec<BudgetEntry>, Error>;

    /// Get a single entry.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no entry has the ID `id`, or
    /// [Error::StoreUnavailable] if the storage cannot be read.
    fn get(&self, id: EntryId) -> Result<BudgetEntry, Error>;

    /// Save a new entry and return it with its assigned ID.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the storage cannot be written.
    fn create(&mut self, entry: NewEntry) -> Result<BudgetEntry, Error>;

    /// Apply a full edit to an existing entry and return the result.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no entry has the ID `id`, or
    /// [Error::StoreUnavailable] if the storage cannot be written.
    fn update(&mut self, id: EntryId, update: EntryUpdate) -> Result<BudgetEntry, Error>;

    /// Change only the status of an existing entry.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no entry has the ID `id`, or
    /// [Error::StoreUnavailable] if the storage cannot be written.
    fn set_status(&mut self, id: EntryId, status: Option<Status>) -> Result<BudgetEntry, Error>;

    /// Remove an entry.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no entry has the ID `id`, including when
    /// it has already been deleted, or [Error::StoreUnavailable] if the
    /// storage cannot be written.
    fn delete(&mut self, id: EntryId) -> Result<(), Error>;
}

/// An entry store shared between request handlers.
pub type SharedStore = Arc<Mutex<dyn EntryStore + Send>>;

/// Wrap `store` so that it can be shared between request handlers.
pub fn share<S: EntryStore + Send + 'static>(store: S) -> SharedStore {
    Arc::new(Mutex::new(store))
}

/// Acquire the lock on `store`, logging and converting a poisoned lock.
pub fn lock(store: &SharedStore) -> Result<MutexGuard<'_, dyn EntryStore + Send + 'static>, Error> {
    store.lock().map_err(|error| {
        tracing::error!("could not acquire the entry store lock: {error}");
        Error::StoreLockError
    })
}
