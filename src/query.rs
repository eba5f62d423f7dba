//! Derived pending/arrived views over the roster.
//!
//! Everything here is recomputed per call with plain O(n) scans; at guest
//! list scale there is nothing worth caching. Collation policy for name
//! ordering is Unicode-lowercase comparison, so `"amy"` sorts before
//! `"Bob"`.

use crate::guest::GuestRecord;

/// Disjoint, covering split of the roster by arrival state.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    /// Guests not yet checked in, in roster order.
    pub pending: Vec<&'a GuestRecord>,
    /// Guests already checked in, in roster order.
    pub arrived: Vec<&'a GuestRecord>,
}

/// Splits the roster into pending and arrived subsets.
pub fn partition<'a>(records: &[&'a GuestRecord]) -> Partition<'a> {
    let mut split = Partition::default();
    for rec in records {
        if rec.arrived {
            split.arrived.push(rec);
        } else {
            split.pending.push(rec);
        }
    }
    split
}

/// Case-insensitive substring filter over name, email, and company.
///
/// An empty term is the identity. Absent optional fields never match a
/// non-empty term.
pub fn filter<'a>(subset: &[&'a GuestRecord], term: &str) -> Vec<&'a GuestRecord> {
    if term.is_empty() {
        return subset.to_vec();
    }

    let needle = term.to_lowercase();
    subset
        .iter()
        .copied()
        .filter(|rec| {
            rec.name.to_lowercase().contains(&needle)
                || rec
                    .email
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
                || rec
                    .company
                    .as_deref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Sorts pending guests ascending by name, case-insensitively, with the raw
/// name as tie-break.
pub fn sort_pending(subset: &mut [&GuestRecord]) {
    subset.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Sorts arrived guests most-recent first. The sort is stable, so equal
/// timestamps keep their relative order.
pub fn sort_arrived(subset: &mut [&GuestRecord]) {
    subset.sort_by(|a, b| b.arrival_time.cmp(&a.arrival_time));
}
