//! Folio counter operations (sequential folio-ID allocation)

use rusqlite::OptionalExtension;

use super::super::{Database, StoreError};

/// Key of the single counter row
const COUNTER_ROW: &str = "folio_counter";

/// Decimal, left-zero-padded to 6 digits. Values beyond 999999 widen
/// naturally; numeric order stays authoritative (the store orders by
/// CAST, not lexicographically).
pub fn format_folio(value: i64) -> String {
    format!("{:06}", value)
}

impl Database {
    /// Next folio ID without mutating state, plus the raw last-issued value.
    ///
    /// A missing or unreadable counter is treated as uninitialized (last
    /// issued = 0) so the first call always yields "000001" instead of
    /// failing the form.
    pub fn peek_next_folio(&self) -> (String, i64) {
        let conn = self.conn.lock().unwrap();

        if let Err(e) = conn.execute(
            "INSERT OR IGNORE INTO folio_counter (id, value) VALUES (?1, 0)",
            [COUNTER_ROW],
        ) {
            log::warn!("Failed to initialize folio counter row: {}", e);
        }

        let last_issued = match conn
            .query_row(
                "SELECT value FROM folio_counter WHERE id = ?1",
                [COUNTER_ROW],
                |row| row.get::<_, i64>(0),
            )
            .optional()
        {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(e) => {
                log::warn!("Folio counter unreadable, treating as uninitialized: {}", e);
                0
            }
        };

        (format_folio(last_issued + 1), last_issued)
    }

    /// Atomically issue the next folio number.
    ///
    /// The read-modify-write runs as a single-row `value = value + 1` inside
    /// a transaction on the mutex-guarded connection, so two concurrent
    /// calls can never observe or return the same value.
    pub fn allocate_next_folio(&self) -> Result<(String, i64), StoreError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT OR IGNORE INTO folio_counter (id, value) VALUES (?1, 0)",
            [COUNTER_ROW],
        )?;
        tx.execute(
            "UPDATE folio_counter SET value = value + 1 WHERE id = ?1",
            [COUNTER_ROW],
        )?;
        let issued: i64 = tx.query_row(
            "SELECT value FROM folio_counter WHERE id = ?1",
            [COUNTER_ROW],
            |row| row.get(0),
        )?;

        tx.commit()?;
        Ok((format_folio(issued), issued))
    }
}
