//! In-memory authoritative roster.

/// Authoritative guest store and check-in transitions.
pub mod store;
