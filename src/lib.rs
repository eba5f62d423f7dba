//! Guest check-in board core: authoritative in-memory roster with
//! write-through SQLite persistence and pure view projection.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::GuestStore`]:
//! ```
//! use guestboard::{core::store::GuestStore, import, types::ViewMode, view};
//!
//! let drafts = import::decode(r#"{"guests":[{"name":"Ann Lee","partySize":2}]}"#)
//!     .expect("decode");
//!
//! let mut store = GuestStore::new();
//! let count = store.replace_all(drafts).expect("replace");
//! assert_eq!(count, 1);
//!
//! let board = view::render(&store.all(), ViewMode::Pending, "");
//! assert_eq!(board.pending_count, 1);
//! assert_eq!(board.arrived_count, 0);
//! ```
//!
//! Runtime usage with a SQLite slot:
//! ```no_run
//! use guestboard::{
//!     core::store::GuestStore,
//!     persist::sqlite::SqliteRosterSink,
//!     runtime::handle::{RuntimeConfig, spawn_guest_board},
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let sink = SqliteRosterSink::open("guestboard.db").expect("open sqlite");
//! let store = GuestStore::from_records(sink.load_roster().expect("load"));
//! let handle = spawn_guest_board(store, Some(Box::new(sink)), RuntimeConfig::default());
//!
//! let count = handle
//!     .load_roster(r#"{"guests":[{"name":"Ann Lee"}]}"#)
//!     .await
//!     .expect("load roster");
//! assert_eq!(count, 1);
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![deny(missing_docs)]

/// Authoritative in-memory store.
pub mod core;
/// Guest domain records and import drafts.
pub mod guest;
/// Uploaded roster document decoding.
pub mod import;
/// Persistence abstraction and SQLite implementation.
pub mod persist;
/// Pending/arrived partitioning, filtering, and sorting.
pub mod query;
/// Single-writer board runtime and events.
pub mod runtime;
/// Shared primitive types and enums.
pub mod types;
/// Presentational board projection.
pub mod view;
