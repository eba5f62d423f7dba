//! SQLite-backed roster slot.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

use crate::guest::GuestRecord;

use super::{PersistResult, RosterSink};

/// Slot name used unless overridden with [`SqliteRosterSink::with_slot`].
pub const DEFAULT_SLOT: &str = "guests";

/// SQLite implementation of [`RosterSink`].
///
/// The whole roster lives in a single upserted row, serialized as a JSON
/// array of records. There is no schema version field; an undecodable
/// payload degrades to an empty roster on load.
pub struct SqliteRosterSink {
    conn: Connection,
    slot: String,
}

impl SqliteRosterSink {
    /// Opens or creates a SQLite-backed sink at `path`.
    ///
    /// Enables WAL mode and sets `synchronous=NORMAL`.
    pub fn open(path: impl AsRef<Path>) -> PersistResult<Self> {
        let conn = Connection::open(path)?;
        Self::init_connection(conn)
    }

    /// Opens an in-memory sink, useful for tests.
    pub fn open_in_memory() -> PersistResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(conn)
    }

    fn init_connection(conn: Connection) -> PersistResult<Self> {
        conn.execute_batch(include_str!("schema.sql"))?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Ok(Self {
            conn,
            slot: DEFAULT_SLOT.to_string(),
        })
    }

    /// Uses `slot` instead of [`DEFAULT_SLOT`].
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = slot.into();
        self
    }

    /// Reads the roster slot.
    ///
    /// An absent slot or an undecodable payload yields an empty roster; the
    /// latter is logged and otherwise treated as "no data".
    pub fn load_roster(&self) -> PersistResult<Vec<GuestRecord>> {
        let payload: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT payload FROM roster WHERE slot = ?1",
                params![self.slot],
                |row| row.get(0),
            )
            .optional()?;

        let Some(payload) = payload else {
            return Ok(Vec::new());
        };

        match serde_json::from_slice(&payload) {
            Ok(records) => Ok(records),
            Err(err) => {
                warn!(slot = %self.slot, %err, "roster slot payload undecodable, starting empty");
                Ok(Vec::new())
            }
        }
    }

    fn save_roster(&mut self, records: &[GuestRecord]) -> PersistResult<()> {
        let payload = serde_json::to_vec(records)?;
        self.conn.execute(
            "INSERT INTO roster(slot, ts_ms, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET ts_ms = excluded.ts_ms, payload = excluded.payload",
            params![self.slot, now_ms() as i64, payload],
        )?;
        Ok(())
    }
}

impl RosterSink for SqliteRosterSink {
    fn save(&mut self, records: &[GuestRecord]) -> PersistResult<()> {
        self.save_roster(records)
    }

    fn load(&mut self) -> PersistResult<Vec<GuestRecord>> {
        self.load_roster()
    }

    fn flush(&mut self) -> PersistResult<()> {
        self.conn.execute_batch("PRAGMA wal_checkpoint(PASSIVE);")?;
        Ok(())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
