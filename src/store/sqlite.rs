//! An entry store backed by a SQLite database.

use rusqlite::{Connection, Row, params, types::ValueRef};

use crate::{
    Error,
    entry::{
        Amount, BudgetEntry, EntryId, EntryUpdate, NewEntry, Status, parse_stored_date,
        parse_stored_label,
    },
    store::EntryStore,
};

const ENTRY_COLUMNS: &str =
    "id, title, amount, description, date, category, payment_method, status, notes";

/// Keeps budget entries in the `budget_entry` table.
#[derive(Debug)]
pub struct SqliteEntryStore {
    connection: Connection,
}

impl SqliteEntryStore {
    /// Create a store from `connection`, creating the entry table if needed.
    ///
    /// # Errors
    /// Returns [Error::StoreUnavailable] if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_entry_table(&connection)?;

        Ok(Self { connection })
    }

    /// The underlying database connection.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }
}

impl EntryStore for SqliteEntryStore {
    fn list(&self) -> Result<Vec<BudgetEntry>, Error> {
        self.connection
            .prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM budget_entry ORDER BY id ASC;"
            ))?
            .query_map([], map_entry_row)?
            .map(|maybe_entry| maybe_entry.map_err(Error::from))
            .collect()
    }

    fn get(&self, id: EntryId) -> Result<BudgetEntry, Error> {
        self.connection
            .prepare(&format!(
                "SELECT {ENTRY_COLUMNS} FROM budget_entry WHERE id = :id;"
            ))?
            .query_row(&[(":id", &id)], map_entry_row)
            .map_err(Error::from)
    }

    fn create(&mut self, entry: NewEntry) -> Result<BudgetEntry, Error> {
        self.connection
            .prepare(&format!(
                "INSERT INTO budget_entry (amount, description, date, category, payment_method, status, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING {ENTRY_COLUMNS};"
            ))?
            .query_row(
                params![
                    entry.amount,
                    entry.description,
                    entry.date,
                    entry.category,
                    entry.payment_method,
                    entry.status,
                    entry.notes,
                ],
                map_entry_row,
            )
            .map_err(Error::from)
    }

    fn update(&mut self, id: EntryId, update: EntryUpdate) -> Result<BudgetEntry, Error> {
        self.connection
            .prepare(&format!(
                "UPDATE budget_entry
                 SET amount = ?1, date = ?2, description = ?3, category = ?4, status = ?5
                 WHERE id = ?6
                 RETURNING {ENTRY_COLUMNS};"
            ))?
            .query_row(
                params![
                    update.amount,
                    update.date,
                    update.description,
                    update.category,
                    update.status,
                    id,
                ],
                map_entry_row,
            )
            .map_err(Error::from)
    }

    fn set_status(&mut self, id: EntryId, status: Option<Status>) -> Result<BudgetEntry, Error> {
        self.connection
            .prepare(&format!(
                "UPDATE budget_entry SET status = ?1 WHERE id = ?2 RETURNING {ENTRY_COLUMNS};"
            ))?
            .query_row(params![status, id], map_entry_row)
            .map_err(Error::from)
    }

    fn delete(&mut self, id: EntryId) -> Result<(), Error> {
        let rows_affected = self
            .connection
            .execute("DELETE FROM budget_entry WHERE id = ?1", [id])?;

        if rows_affected == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

/// Create the budget entry table in the database.
///
/// The amount column has no declared type so that text written by other
/// clients is kept as is instead of being rejected.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_entry_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS budget_entry (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT,
            amount,
            description TEXT,
            date TEXT,
            category TEXT,
            payment_method TEXT,
            status TEXT,
            notes TEXT
        );",
    )
}

fn map_entry_row(row: &Row) -> Result<BudgetEntry, rusqlite::Error> {
    let amount: Option<Amount> = row.get(2)?;

    Ok(BudgetEntry {
        id: row.get(0)?,
        title: row.get(1)?,
        amount,
        description: row.get(3)?,
        date: stored_text(row, 4)?.as_deref().and_then(parse_stored_date),
        category: stored_text(row, 5)?.as_deref().and_then(parse_stored_label),
        payment_method: stored_text(row, 6)?.as_deref().and_then(parse_stored_label),
        status: stored_text(row, 7)?.as_deref().and_then(parse_stored_label),
        notes: row.get(8)?,
    })
}

/// Read column `index` as text, whatever type other clients wrote it as.
fn stored_text(row: &Row, index: usize) -> Result<Option<String>, rusqlite::Error> {
    let text = match row.get_ref(index)? {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(number) => Some(number.to_string()),
        ValueRef::Real(number) => Some(number.to_string()),
        ValueRef::Text(text) => Some(String::from_utf8_lossy(text).into_owned()),
    };

    Ok(text)
}
