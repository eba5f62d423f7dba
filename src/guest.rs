//! Guest domain record and import draft types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{GuestId, TimestampMs};

/// Fully materialized, authoritative guest record.
///
/// Serializes in the camelCase wire shape shared by the import document and
/// the persisted slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    /// Stable guest identifier, immutable once assigned.
    pub id: GuestId,
    /// Display name, non-empty.
    pub name: String,
    /// Optional contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Optional company or affiliation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Number of people covered by this record.
    pub party_size: u32,
    /// True once the guest has checked in.
    pub arrived: bool,
    /// Check-in timestamp, set exactly once; `Some` iff `arrived`.
    pub arrival_time: Option<TimestampMs>,
    /// Unrecognized import fields, carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Guest entry as it appears in an uploaded roster document.
///
/// Everything is optional except that the store rejects an empty `name`.
/// Arrival state in the source document is ignored; imports start everyone
/// as not arrived.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDraft {
    /// Supplied identifier; a fresh one is generated when absent.
    #[serde(default)]
    pub id: Option<GuestId>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Optional contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional company or affiliation.
    #[serde(default)]
    pub company: Option<String>,
    /// Party size; defaults to 1 when absent.
    #[serde(default)]
    pub party_size: Option<u32>,
    /// Unrecognized fields, passed through to the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
