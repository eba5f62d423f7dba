use std::collections::BTreeSet;

use proptest::prelude::*;

use guestboard::{
    core::store::{CheckInOutcome, GuestStore},
    guest::{GuestDraft, GuestRecord},
    query,
};

#[derive(Debug, Clone)]
enum Action {
    Load { count: u8 },
    CheckIn { target: u8 },
    CheckInUnknown { tag: u8 },
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0u8..12).prop_map(|count| Action::Load { count }),
        (0u8..24).prop_map(|target| Action::CheckIn { target }),
        (0u8..24).prop_map(|tag| Action::CheckInUnknown { tag }),
    ]
}

fn draft(i: u8) -> GuestDraft {
    GuestDraft {
        name: format!("Guest {i}"),
        party_size: Some(u32::from(i % 4) + 1),
        ..GuestDraft::default()
    }
}

fn snapshot(store: &GuestStore) -> Vec<GuestRecord> {
    store.all_cloned()
}

fn assert_invariants(store: &GuestStore) {
    let all = store.all();
    let split = query::partition(&all);

    // Disjoint and covering.
    assert_eq!(split.pending.len() + split.arrived.len(), all.len());
    let pending_ids: BTreeSet<&str> = split.pending.iter().map(|r| r.id.as_str()).collect();
    let arrived_ids: BTreeSet<&str> = split.arrived.iter().map(|r| r.id.as_str()).collect();
    assert!(pending_ids.is_disjoint(&arrived_ids));

    // Arrival flag and timestamp agree; ids unique.
    let mut seen = BTreeSet::new();
    for rec in &all {
        assert_eq!(rec.arrived, rec.arrival_time.is_some());
        assert!(seen.insert(rec.id.as_str()));
    }

    // Empty-term filter is the identity on each subset.
    let filtered: Vec<&str> = query::filter(&split.pending, "")
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    let original: Vec<&str> = split.pending.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(filtered, original);
}

proptest! {
    #[test]
    fn random_command_sequences_preserve_roster_invariants(
        actions in prop::collection::vec(action_strategy(), 1..120)
    ) {
        let mut store = GuestStore::new();

        for action in actions {
            match action {
                Action::Load { count } => {
                    let drafts = (0..count).map(draft).collect();
                    let loaded = store.replace_all(drafts).expect("replace");
                    prop_assert_eq!(loaded, usize::from(count));
                    prop_assert!(store.all().iter().all(|r| !r.arrived));
                }
                Action::CheckIn { target } => {
                    let ids: Vec<String> =
                        store.all().iter().map(|r| r.id.clone()).collect();
                    if ids.is_empty() {
                        continue;
                    }
                    let id = &ids[usize::from(target) % ids.len()];

                    match store.check_in(id) {
                        CheckInOutcome::Arrived(at) => {
                            // Repeating the command must not move the timestamp.
                            prop_assert_eq!(
                                store.check_in(id),
                                CheckInOutcome::AlreadyArrived(at)
                            );
                        }
                        CheckInOutcome::AlreadyArrived(at) => {
                            prop_assert_eq!(
                                store.get(id).map(|r| r.arrival_time),
                                Some(Some(at))
                            );
                        }
                        CheckInOutcome::NotFound => {
                            prop_assert!(false, "known id reported NotFound");
                        }
                    }
                }
                Action::CheckInUnknown { tag } => {
                    let before = snapshot(&store);
                    let outcome = store.check_in(&format!("missing-{tag}"));
                    prop_assert_eq!(outcome, CheckInOutcome::NotFound);
                    prop_assert_eq!(snapshot(&store), before);
                }
            }

            assert_invariants(&store);
        }
    }
}
