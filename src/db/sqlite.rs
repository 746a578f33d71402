//! SQLite-backed store shared by the folio counter and the record table.
//!
//! A single connection behind a mutex: every store call holds the lock for
//! its duration, which is what serializes concurrent folio allocations.

use std::fmt;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

/// Store-level failure taxonomy. Everything collapses to a generic 500 at
/// the HTTP boundary, but callers and tests can still tell them apart.
#[derive(Debug)]
pub enum StoreError {
    /// Update targeted a folio ID absent from the store
    NotFound(String),
    /// Insert targeted a folio ID already present
    DuplicateKey(String),
    /// Backing store unreachable or erroring
    Sqlite(rusqlite::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound(folio) => write!(f, "No investigation with folio {}", folio),
            StoreError::DuplicateKey(folio) => {
                write!(f, "Investigation with folio {} already exists", folio)
            }
            StoreError::Sqlite(e) => write!(f, "Database error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e)
    }
}

pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database and initialize the schema
    pub fn new(database_url: &str) -> rusqlite::Result<Self> {
        if let Some(parent) = Path::new(database_url).parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(database_url)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init_tables()?;
        Ok(db)
    }

    fn init_tables(&self) -> rusqlite::Result<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "CREATE TABLE IF NOT EXISTS investigations (
                folio_id TEXT PRIMARY KEY,
                subject_name TEXT NOT NULL,
                subject_age TEXT NOT NULL,
                area TEXT NOT NULL,
                seniority TEXT NOT NULL,
                incident_date TEXT NOT NULL,
                accident_statement TEXT NOT NULL,
                corrective_actions TEXT NOT NULL DEFAULT '[]',
                injured_party_signature TEXT,
                safety_committee_signature TEXT,
                safety_dept_signature TEXT,
                area_supervisor_signature TEXT,
                area_manager_signature TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        // Single-row table holding the last issued folio number
        conn.execute(
            "CREATE TABLE IF NOT EXISTS folio_counter (
                id TEXT PRIMARY KEY,
                value INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        Ok(())
    }
}
