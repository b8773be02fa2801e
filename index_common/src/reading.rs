//! Normalized index reading produced by the parser.

use crate::symbols::IndexSymbol;

/// A single parsed observation of an index.
///
/// `change` and `change_percent` always share a sign and `value` is never
/// negative; the parser rejects payloads that would violate either. Readings
/// are constructed only by the parser, consumed once by the presenter, and
/// then discarded; no history is retained.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexReading {
    /// Symbol this reading is attributed to.
    pub symbol: IndexSymbol,
    /// Latest index value, in points.
    pub value: f64,
    /// Absolute change versus the prior value.
    pub change: f64,
    /// Relative change versus the prior value, in percent.
    pub change_percent: f64,
}

impl IndexReading {
    /// Whether the index moved up (or is flat) versus the prior value.
    pub fn is_up(&self) -> bool {
        self.change >= 0.0
    }
}
