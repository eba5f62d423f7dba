//! Persistence abstraction and SQLite implementation.

/// SQLite-backed roster slot.
pub mod sqlite;

use thiserror::Error;

use crate::guest::GuestRecord;

/// Storage-layer failures.
///
/// Never fatal to the board: the runtime logs save failures and keeps the
/// in-memory roster authoritative for the session.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Roster (de)serialization failure.
    #[error("roster serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Anything else.
    #[error("{0}")]
    Message(String),
}

/// Convenience alias for persistence results.
pub type PersistResult<T> = Result<T, PersistError>;

/// Durable slot for the full roster.
///
/// A best-effort write-through cache, not a guarantee: `save` overwrites the
/// slot with the whole collection, `load` yields an empty roster when the
/// slot is absent or its payload is undecodable.
pub trait RosterSink: Send {
    /// Overwrites the slot with the full roster.
    fn save(&mut self, records: &[GuestRecord]) -> PersistResult<()>;

    /// Reads the slot. Absent or corrupt data is "no data", not an error.
    fn load(&mut self) -> PersistResult<Vec<GuestRecord>>;

    /// Flushes buffered writes, when the backend has any.
    fn flush(&mut self) -> PersistResult<()> {
        Ok(())
    }
}
