//! Entity store for the clinic front office.
//!
//! The store is an explicit, injectable object wrapping an in-memory SQLite
//! database; it owns every top-level collection (patients, products,
//! expenses, sales, invoices) and is the single source of truth mutated by
//! the command methods defined in the per-entity files. All state is
//! session-local and discarded when the store is dropped.

mod schema;

mod expenses;
mod invoices;
mod patients;
mod products;
mod sales;

pub use schema::SCHEMA;

use rusqlite::Connection;
use thiserror::Error;

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Session entity store.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Create the session store. The backing database lives in memory and
    /// vanishes with the store; there is no file-backed variant.
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize()?;
        Ok(store)
    }

    /// Initialize schema.
    fn initialize(&self) -> StoreResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
