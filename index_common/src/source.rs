//! Data-source strategy abstraction.
//!
//! Two interchangeable retrieval strategies exist, scraping the rendered
//! priceboard or querying the quotes API, chosen at deploy time by running
//! the corresponding binary. Both yield a strategy-specific `RawPayload` that
//! the parser normalizes into an `IndexReading`.

use serde::Deserialize;

use crate::result::Result;
use crate::symbols::IndexSymbol;

/// One day of quotes for a symbol, as returned by the quotes API.
/// Unknown JSON fields are ignored during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DailyRecord {
    /// Opening value of the session.
    pub open: f64,
    /// Closing value of the session.
    pub close: f64,
}

/// Raw, strategy-specific fetch output. Produced per fetch and discarded
/// after parsing.
#[derive(Debug, Clone)]
pub enum RawPayload {
    /// Text extracted from the priceboard chart-detail element.
    BoardText(String),
    /// Daily price records, ordered oldest to newest.
    DailyRecords(Vec<DailyRecord>),
}

/// Retrieval strategy for raw index data.
pub trait IndexSource {
    /// Fetch the raw payload for `symbol`.
    ///
    /// Blocks the calling thread for at most the strategy's own transport or
    /// render timeout. Called only from the scheduler's consumer thread.
    fn fetch(&self, symbol: IndexSymbol) -> Result<RawPayload>;
}
