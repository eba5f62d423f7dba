//! Single-writer async board loop and event stream APIs.

/// Event stream types emitted by the board loop.
pub mod events;
/// Handle and command loop implementation.
pub mod handle;
