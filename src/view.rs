//! Presentational projection of the roster.
//!
//! [`render`] is a pure function of roster, view mode, and search term; the
//! presentation layer draws the returned [`Board`] and sends commands back
//! through the runtime handle.

use chrono::{Local, TimeZone};

use crate::{
    guest::GuestRecord,
    query,
    types::{GuestId, TimestampMs, ViewMode},
};

/// Check-in affordance or arrived badge on a guest card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    /// Guest is pending; the card carries a check-in action for its id.
    Pending,
    /// Guest has arrived; the card shows a badge and the local check-in time.
    Arrived {
        /// Formatted local check-in time, e.g. `03:42 PM`.
        time_label: String,
    },
}

/// One guest row as shown on a board panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestCard {
    /// Guest id, carried so a check-in command targets the record and not a
    /// view position.
    pub id: GuestId,
    /// Display name.
    pub name: String,
    /// Contact lines; only optional fields that are present and non-empty.
    pub details: Vec<String>,
    /// `Party of N` badge, only when the party is larger than one.
    pub party_badge: Option<String>,
    /// Pending action or arrived badge.
    pub status: CardStatus,
}

/// Body of a rendered panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    /// Filtered, sorted guest cards.
    Cards(Vec<GuestCard>),
    /// Nothing to show; the message depends on whether the subset itself is
    /// empty or the search term filtered everything away.
    Empty {
        /// Primary empty-state text.
        message: String,
        /// Secondary hint, present only on the never-loaded pending panel.
        hint: Option<String>,
    },
}

/// Full two-panel board projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Currently active tab.
    pub active: ViewMode,
    /// Pending panel, sorted ascending by name.
    pub pending: Panel,
    /// Arrived panel, sorted most-recent first.
    pub arrived: Panel,
    /// Raw pending cardinality, unaffected by the search term.
    pub pending_count: usize,
    /// Raw arrived cardinality, unaffected by the search term.
    pub arrived_count: usize,
}

/// Projects the roster into a [`Board`].
///
/// Counts are taken before filtering, so they always reflect the full
/// roster. Both panels are rendered regardless of `active`; tab switching is
/// purely a visibility concern.
pub fn render(records: &[&GuestRecord], active: ViewMode, term: &str) -> Board {
    let split = query::partition(records);
    let pending_count = split.pending.len();
    let arrived_count = split.arrived.len();

    let mut pending = query::filter(&split.pending, term);
    query::sort_pending(&mut pending);
    let pending = panel(
        pending,
        term,
        "No guests pending check-in",
        Some("Load a guest list to get started"),
    );

    let mut arrived = query::filter(&split.arrived, term);
    query::sort_arrived(&mut arrived);
    let arrived = panel(arrived, term, "No guests have arrived yet", None);

    Board {
        active,
        pending,
        arrived,
        pending_count,
        arrived_count,
    }
}

fn panel(
    subset: Vec<&GuestRecord>,
    term: &str,
    empty_message: &str,
    empty_hint: Option<&str>,
) -> Panel {
    if subset.is_empty() {
        if term.is_empty() {
            return Panel::Empty {
                message: empty_message.to_string(),
                hint: empty_hint.map(str::to_string),
            };
        }
        return Panel::Empty {
            message: "No guests found".to_string(),
            hint: None,
        };
    }

    Panel::Cards(subset.into_iter().map(card).collect())
}

fn card(rec: &GuestRecord) -> GuestCard {
    let mut details = Vec::new();
    if let Some(email) = rec.email.as_deref().filter(|s| !s.is_empty()) {
        details.push(email.to_string());
    }
    if let Some(company) = rec.company.as_deref().filter(|s| !s.is_empty()) {
        details.push(company.to_string());
    }

    let party_badge = (rec.party_size > 1).then(|| format!("Party of {}", rec.party_size));

    let status = match rec.arrival_time {
        Some(at) if rec.arrived => CardStatus::Arrived {
            time_label: format_local_time(at),
        },
        _ => CardStatus::Pending,
    };

    GuestCard {
        id: rec.id.clone(),
        name: rec.name.clone(),
        details,
        party_badge,
        status,
    }
}

fn format_local_time(at_ms: TimestampMs) -> String {
    Local
        .timestamp_millis_opt(at_ms as i64)
        .single()
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}
