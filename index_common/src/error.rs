//! Error taxonomy for a single refresh cycle.
//!
//! Every failure class a refresh can hit maps to one `FetchError` variant, so
//! the coordinator can log it and the presenter can turn it into a short tray
//! label. Errors are produced and consumed within one cycle and never stored.
use thiserror::Error;

/// Unified error type for fetching and parsing index data.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure: DNS, connection, a non-success HTTP status,
    /// or a browser that could not be driven to the dashboard.
    #[error("network error: {0}")]
    Network(String),

    /// The awaited page element never became visible within the render wait.
    /// Scrape strategy only; carries the selector that was awaited.
    #[error("render timeout waiting for {0}")]
    RenderTimeout(String),

    /// The payload did not match the expected structure or pattern.
    /// Carries the offending raw text for diagnostics.
    #[error("unexpected payload shape: {0}")]
    ShapeMismatch(String),

    /// A matched field was not a valid number. Carries the raw field text.
    #[error("invalid number: {0}")]
    NumericParse(String),

    /// Fewer daily records than the two needed to compute a change.
    /// API strategy only; carries the record count received.
    #[error("insufficient data: {0} record(s)")]
    InsufficientData(usize),
}
