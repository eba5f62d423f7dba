//! Board event stream payloads.

use crate::types::{GuestId, ViewMode};

/// Events emitted from the single-writer board loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    /// A new roster replaced the previous one.
    RosterReplaced {
        /// Number of guests loaded.
        count: usize,
    },
    /// A guest checked in.
    CheckedIn {
        /// Checked-in guest id.
        id: GuestId,
    },
    /// The active tab changed.
    ViewSwitched {
        /// Newly active view.
        mode: ViewMode,
    },
    /// The search term changed or was cleared.
    SearchChanged,
    /// The roster was written to durable storage.
    Saved {
        /// Number of guests in the saved roster.
        count: usize,
    },
    /// A durable write failed; the in-memory roster stays authoritative.
    SaveFailed,
}
