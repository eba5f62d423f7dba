//! Single-writer command loop owning the store and transient UI state.
//!
//! The loop is the one logical actor that mutates the roster: commands are
//! handled to completion in arrival order, so no partial import or
//! interleaved mutation is ever observable, and a superseding import simply
//! queues behind the previous one.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, broadcast, mpsc, oneshot};
use tracing::warn;

use crate::{
    core::store::{CheckInOutcome, GuestStore, StoreError},
    guest::GuestRecord,
    import::{self, ImportError},
    persist::RosterSink,
    types::{GuestId, ViewMode},
    view::{self, Board},
};

use super::events::BoardEvent;

/// Failures surfaced to board commands.
///
/// Persistence failures are deliberately absent: they are logged and
/// reported on the event stream, never propagated to a command.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Uploaded document could not be decoded.
    #[error(transparent)]
    Import(#[from] ImportError),
    /// Decoded document failed roster validation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// The board loop is gone.
    #[error("board runtime channel closed")]
    ChannelClosed,
}

/// Queue bounds for the board loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Capacity of the command queue.
    pub cmd_queue_bound: usize,
    /// Capacity of the broadcast event buffer.
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            cmd_queue_bound: 256,
            events_capacity: 1024,
        }
    }
}

/// Cloneable handle to a spawned board loop.
pub struct BoardHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<BoardEvent>,
}

impl Clone for BoardHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    LoadRoster {
        raw: String,
        resp: oneshot::Sender<Result<usize, RuntimeError>>,
    },
    CheckIn {
        id: GuestId,
        resp: oneshot::Sender<CheckInOutcome>,
    },
    Search {
        term: String,
        resp: oneshot::Sender<()>,
    },
    ClearSearch {
        resp: oneshot::Sender<()>,
    },
    SwitchView {
        mode: ViewMode,
        resp: oneshot::Sender<()>,
    },
    Render {
        resp: oneshot::Sender<Board>,
    },
    Get {
        id: GuestId,
        resp: oneshot::Sender<Option<GuestRecord>>,
    },
    Roster {
        resp: oneshot::Sender<Vec<GuestRecord>>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

type SharedSink = Arc<Mutex<Box<dyn RosterSink>>>;

/// Spawns the board loop and returns its handle.
///
/// When a sink is given, every roster-changing command writes through to it
/// before the command reply, so durable state never lags observable state.
pub fn spawn_guest_board(
    store: GuestStore,
    sink: Option<Box<dyn RosterSink>>,
    config: RuntimeConfig,
) -> BoardHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<BoardEvent>(config.events_capacity);

    let sink: Option<SharedSink> = sink.map(|s| Arc::new(Mutex::new(s)));
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let mut store = store;
        // Ephemeral UI state, reset on restart.
        let mut active = ViewMode::Pending;
        let mut term = String::new();

        while let Some(cmd) = cmd_rx.recv().await {
            let done = handle_command(
                cmd,
                &mut store,
                &mut active,
                &mut term,
                sink.as_ref(),
                &events_tx_loop,
            )
            .await;
            if done {
                break;
            }
        }
    });

    BoardHandle { cmd_tx, events_tx }
}

impl BoardHandle {
    /// Subscribes to the board event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events_tx.subscribe()
    }

    /// Decodes `raw` and replaces the roster wholesale. Returns the loaded
    /// count. On any decode or validation error the roster is unchanged.
    pub async fn load_roster(&self, raw: impl Into<String>) -> Result<usize, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::LoadRoster {
                raw: raw.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)?
    }

    /// Marks a guest as arrived. Unknown ids and repeat check-ins are
    /// tolerated outcomes, not errors.
    pub async fn check_in(&self, id: impl Into<GuestId>) -> Result<CheckInOutcome, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::CheckIn {
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Sets the active search term.
    pub async fn search(&self, term: impl Into<String>) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Search {
                term: term.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Clears the active search term.
    pub async fn clear_search(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::ClearSearch { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Switches the active tab. Unconditional and immediate.
    pub async fn switch_view(&self, mode: ViewMode) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::SwitchView { mode, resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Renders both panels against the current store and UI state.
    pub async fn render(&self) -> Result<Board, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Render { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Fetches a single record by id.
    pub async fn get(&self, id: impl Into<GuestId>) -> Result<Option<GuestRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Get {
                id: id.into(),
                resp: tx,
            })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Returns the full roster in import order.
    pub async fn roster(&self) -> Result<Vec<GuestRecord>, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Roster { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }

    /// Flushes the sink and stops the loop.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Shutdown { resp: tx })
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

async fn handle_command(
    cmd: Command,
    store: &mut GuestStore,
    active: &mut ViewMode,
    term: &mut String,
    sink: Option<&SharedSink>,
    events_tx: &broadcast::Sender<BoardEvent>,
) -> bool {
    match cmd {
        Command::LoadRoster { raw, resp } => {
            let res = import::decode(&raw)
                .map_err(RuntimeError::from)
                .and_then(|drafts| store.replace_all(drafts).map_err(RuntimeError::from));
            if let Ok(count) = &res {
                write_through(sink, store.all_cloned(), events_tx).await;
                let _ = events_tx.send(BoardEvent::RosterReplaced { count: *count });
            }
            let _ = resp.send(res);
        }
        Command::CheckIn { id, resp } => {
            let outcome = store.check_in(&id);
            if outcome.changed() {
                write_through(sink, store.all_cloned(), events_tx).await;
                let _ = events_tx.send(BoardEvent::CheckedIn { id });
            }
            let _ = resp.send(outcome);
        }
        Command::Search { term: new_term, resp } => {
            *term = new_term;
            let _ = events_tx.send(BoardEvent::SearchChanged);
            let _ = resp.send(());
        }
        Command::ClearSearch { resp } => {
            term.clear();
            let _ = events_tx.send(BoardEvent::SearchChanged);
            let _ = resp.send(());
        }
        Command::SwitchView { mode, resp } => {
            *active = mode;
            let _ = events_tx.send(BoardEvent::ViewSwitched { mode });
            let _ = resp.send(());
        }
        Command::Render { resp } => {
            let _ = resp.send(view::render(&store.all(), *active, term));
        }
        Command::Get { id, resp } => {
            let _ = resp.send(store.get(&id).cloned());
        }
        Command::Roster { resp } => {
            let _ = resp.send(store.all_cloned());
        }
        Command::Shutdown { resp } => {
            if let Some(sink) = sink {
                let sink_ref = Arc::clone(sink);
                let res = tokio::task::spawn_blocking(move || {
                    let mut sink = sink_ref.blocking_lock();
                    sink.flush()
                })
                .await;
                match res {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => warn!(%err, "sink flush failed during shutdown"),
                    Err(err) => warn!(%err, "sink flush task failed during shutdown"),
                }
            }
            let _ = resp.send(());
            return true;
        }
    }

    false
}

async fn write_through(
    sink: Option<&SharedSink>,
    records: Vec<GuestRecord>,
    events_tx: &broadcast::Sender<BoardEvent>,
) {
    let Some(sink) = sink else {
        return;
    };

    let count = records.len();
    let sink_ref = Arc::clone(sink);
    let res = tokio::task::spawn_blocking(move || {
        let mut sink = sink_ref.blocking_lock();
        sink.save(&records)
    })
    .await;

    match res {
        Ok(Ok(())) => {
            let _ = events_tx.send(BoardEvent::Saved { count });
        }
        Ok(Err(err)) => {
            warn!(%err, "roster save failed, in-memory roster stays authoritative");
            let _ = events_tx.send(BoardEvent::SaveFailed);
        }
        Err(err) => {
            warn!(%err, "roster save task failed");
            let _ = events_tx.send(BoardEvent::SaveFailed);
        }
    }
}
