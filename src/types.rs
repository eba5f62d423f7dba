//! Shared identifier aliases and UI-facing enums.

use serde::{Deserialize, Serialize};

/// Opaque guest identifier. Generated ids are UUIDv4 strings; uploaded
/// rosters may supply their own.
pub type GuestId = String;

/// Milliseconds since the Unix epoch.
pub type TimestampMs = u64;

/// Which roster subset the active board tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Guests not yet checked in.
    Pending,
    /// Guests already checked in.
    Arrived,
}
