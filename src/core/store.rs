//! Authoritative in-memory guest roster.

use std::time::{SystemTime, UNIX_EPOCH};

use hashbrown::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    guest::{GuestDraft, GuestRecord},
    types::{GuestId, TimestampMs},
};

/// Validation failures raised while replacing the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A guest entry had no usable display name.
    #[error("guest entry {index} has no name")]
    MissingName {
        /// Zero-based position of the offending entry.
        index: usize,
    },
}

/// Result of a check-in command.
///
/// Check-in never fails: an unknown id is a stale command from a view that
/// outlived its roster, tolerated as a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Guest transitioned from pending to arrived at this timestamp.
    Arrived(TimestampMs),
    /// Guest had already checked in; the stored timestamp is unchanged.
    AlreadyArrived(TimestampMs),
    /// No guest with the requested id.
    NotFound,
}

impl CheckInOutcome {
    /// True when the command changed observable state.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Arrived(_))
    }
}

/// Single source of truth for the loaded roster.
///
/// Records are kept in import order. The only mutations are wholesale
/// replacement via [`GuestStore::replace_all`] and the one-way arrival
/// transition via [`GuestStore::check_in`].
#[derive(Debug, Default)]
pub struct GuestStore {
    records: HashMap<GuestId, GuestRecord>,
    order: Vec<GuestId>,
}

impl GuestStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from a previously persisted roster, preserving
    /// arrived state. On duplicate ids the first record wins.
    pub fn from_records(records: Vec<GuestRecord>) -> Self {
        let mut store = Self::default();
        for rec in records {
            if store.records.contains_key(&rec.id) {
                continue;
            }
            store.order.push(rec.id.clone());
            store.records.insert(rec.id.clone(), rec);
        }
        store
    }

    /// Replaces the entire roster with normalized records built from `drafts`.
    ///
    /// Every draft must carry a non-empty `name`. Missing ids get a fresh
    /// UUIDv4; a supplied id that collides with an earlier entry is also
    /// re-assigned so ids stay unique. Arrival state from the source document
    /// is discarded: every record starts with `arrived = false` and no
    /// timestamp, and stale `arrived`/`arrivalTime` keys are stripped from
    /// the passthrough map.
    ///
    /// The new roster is staged in full before the swap, so a validation
    /// failure leaves the current roster untouched. Returns the loaded count.
    pub fn replace_all(&mut self, drafts: Vec<GuestDraft>) -> Result<usize, StoreError> {
        let mut records = HashMap::with_capacity(drafts.len());
        let mut order = Vec::with_capacity(drafts.len());

        for (index, mut draft) in drafts.into_iter().enumerate() {
            if draft.name.trim().is_empty() {
                return Err(StoreError::MissingName { index });
            }
            draft.extra.remove("arrived");
            draft.extra.remove("arrivalTime");

            let mut id = draft.id.take().unwrap_or_else(generate_id);
            if records.contains_key(&id) {
                id = generate_id();
            }

            order.push(id.clone());
            records.insert(
                id.clone(),
                GuestRecord {
                    id,
                    name: draft.name,
                    email: draft.email,
                    company: draft.company,
                    party_size: draft.party_size.unwrap_or(1),
                    arrived: false,
                    arrival_time: None,
                    extra: draft.extra,
                },
            );
        }

        let count = order.len();
        self.records = records;
        self.order = order;
        Ok(count)
    }

    /// Marks a guest as arrived, stamping the current time on the first
    /// transition only. Idempotent: a repeat call reports the original
    /// timestamp and changes nothing.
    pub fn check_in(&mut self, id: &str) -> CheckInOutcome {
        let Some(rec) = self.records.get_mut(id) else {
            return CheckInOutcome::NotFound;
        };

        if rec.arrived {
            return CheckInOutcome::AlreadyArrived(rec.arrival_time.unwrap_or_default());
        }

        let at = now_ms();
        rec.arrived = true;
        rec.arrival_time = Some(at);
        CheckInOutcome::Arrived(at)
    }

    /// Looks up a single record.
    pub fn get(&self, id: &str) -> Option<&GuestRecord> {
        self.records.get(id)
    }

    /// Returns the full roster in import order. Read-only snapshot; only
    /// [`GuestStore::replace_all`] and [`GuestStore::check_in`] mutate.
    pub fn all(&self) -> Vec<&GuestRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Owned copy of the full roster in import order.
    pub fn all_cloned(&self) -> Vec<GuestRecord> {
        self.all().into_iter().cloned().collect()
    }

    /// Number of loaded guests.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no roster is loaded.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn generate_id() -> GuestId {
    Uuid::new_v4().to_string()
}

fn now_ms() -> TimestampMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
