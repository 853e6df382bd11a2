//! SQLite persistence for universities and teachers.
//!
//! `Database` is the only handle to the store. It is created once in `main.rs`
//! and shared with the Actix application as `web::Data<Database>`; the core
//! services receive it explicitly.
//!
//! Sub-modules hold the statements for each table. Their functions take a
//! plain `&Connection`, so they can run on the handle's connection directly or
//! inside a `rusqlite::Transaction` (which derefs to `Connection`).

pub mod seed;
pub mod teachers;
pub mod universities;

use crate::error::StoreError;
use log::info;
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS university (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    name           TEXT    NOT NULL CHECK (length(name) <= 50),
    location       TEXT    NOT NULL CHECK (length(location) <= 50),
    average_salary INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS teacher (
    teacher_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    name          TEXT    NOT NULL CHECK (length(name) <= 50),
    last_name     TEXT    NOT NULL CHECK (length(last_name) <= 50),
    birth_date    TEXT    NOT NULL,
    salary        INTEGER NOT NULL,
    university_id INTEGER NOT NULL REFERENCES university (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS teacher_university_idx ON teacher (university_id);
";

/// Shared handle to the application database.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (or creates) the database file at `path` and makes sure the schema exists.
    ///
    /// When the file did not exist beforehand and `seed` is set, the demo data
    /// set is inserted.
    pub fn open(path: &Path, seed: bool) -> Result<Self, StoreError> {
        let is_new = !path.exists();
        let conn = Connection::open(path)?;
        let db = Self::from_connection(conn)?;
        if is_new && seed {
            db.with_connection(|conn| seed::populate(conn))?;
            info!("Seeded new database at {}", path.display());
        }
        Ok(db)
    }

    /// Opens an empty private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", true)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with exclusive access to the connection.
    ///
    /// A panic in an earlier caller does not lock the store for good: its open
    /// transaction was rolled back when it was dropped.
    pub fn with_connection<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Connection) -> Result<T, E>,
    {
        let mut conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut *conn)
    }
}
