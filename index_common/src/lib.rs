//!
//! Refresh pipeline shared by the tray indicator binaries.
//!
//! This crate aggregates:
//! - `error` — unified `FetchError` taxonomy for a single refresh cycle.
//! - `result` — handy `Result<T, FetchError>` alias.
//! - `symbols` — the fixed set of tracked index symbols.
//! - `reading` — normalized reading produced by the parser.
//! - `source` — the `IndexSource` strategy trait and raw payload types.
//! - `parser` — raw payload to `IndexReading` conversion.
//! - `presenter` — tray title formatting and delivery.
//! - `coordinator` — selected-symbol state and the fetch→parse→display cycle.
//! - `scheduler` — the single-consumer trigger loop (timer, menu, quit).
//! - `tray` — the `TrayDisplay` trait and the StatusNotifierItem backend.
#![warn(missing_docs)]
pub mod coordinator;
pub mod error;
pub mod parser;
pub mod presenter;
pub mod reading;
pub mod result;
pub mod scheduler;
pub mod source;
pub mod symbols;
pub mod tray;

pub use error::FetchError;
pub use result::Result;
pub use scheduler::Trigger;
pub use symbols::IndexSymbol;
