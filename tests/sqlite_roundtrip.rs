use rusqlite::{Connection, params};
use tempfile::TempDir;

use guestboard::{
    core::store::GuestStore,
    import,
    persist::{RosterSink, sqlite::SqliteRosterSink},
};

fn loaded_store(raw: &str) -> GuestStore {
    let mut store = GuestStore::new();
    store
        .replace_all(import::decode(raw).expect("decode"))
        .expect("replace");
    store
}

#[test]
fn roster_round_trips_through_the_slot() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("board.db");

    let mut store = loaded_store(
        r#"{"guests":[
            {"name":"Ann Lee","partySize":2,"company":"Acme Corp"},
            {"name":"Bob Ray","email":"bob@example.com"}
        ]}"#,
    );
    let ann = store.all()[0].id.clone();
    store.check_in(&ann);

    let mut sink = SqliteRosterSink::open(&db_path).expect("open sqlite");
    sink.save(&store.all_cloned()).expect("save");
    drop(sink);

    let mut reopened = SqliteRosterSink::open(&db_path).expect("reopen");
    let records = reopened.load().expect("load");
    assert_eq!(records, store.all_cloned());

    let restored = GuestStore::from_records(records);
    assert!(restored.get(&ann).expect("ann").arrived);
}

#[test]
fn absent_slot_loads_as_empty_roster() {
    let mut sink = SqliteRosterSink::open_in_memory().expect("open");
    assert!(sink.load().expect("load").is_empty());
}

#[test]
fn corrupt_slot_payload_is_treated_as_no_data() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("board.db");

    let mut sink = SqliteRosterSink::open(&db_path).expect("open");
    let store = loaded_store(r#"{"guests":[{"name":"Ann Lee"}]}"#);
    sink.save(&store.all_cloned()).expect("save");
    drop(sink);

    let conn = Connection::open(&db_path).expect("raw open");
    conn.execute(
        "UPDATE roster SET payload = ?1 WHERE slot = 'guests'",
        params![b"not json".to_vec()],
    )
    .expect("corrupt");
    drop(conn);

    let mut reopened = SqliteRosterSink::open(&db_path).expect("reopen");
    assert!(reopened.load().expect("load").is_empty());
}

#[test]
fn slots_are_independent() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("board.db");

    let store = loaded_store(r#"{"guests":[{"name":"Ann Lee"}]}"#);
    let mut sink = SqliteRosterSink::open(&db_path)
        .expect("open")
        .with_slot("spring-gala");
    sink.save(&store.all_cloned()).expect("save");
    drop(sink);

    let mut default_slot = SqliteRosterSink::open(&db_path).expect("reopen");
    assert!(default_slot.load().expect("load").is_empty());

    let mut named = SqliteRosterSink::open(&db_path)
        .expect("reopen named")
        .with_slot("spring-gala");
    assert_eq!(named.load().expect("load").len(), 1);
}
