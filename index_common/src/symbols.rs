//! Index symbols tracked by the indicator.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Fixed set of supported index symbols.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[strum(ascii_case_insensitive)]
pub enum IndexSymbol {
    VNINDEX,
    VN30,
    HNX,
}

impl IndexSymbol {
    /// All symbols, in tray menu order.
    pub const ALL: [IndexSymbol; 3] = [IndexSymbol::VNINDEX, IndexSymbol::VN30, IndexSymbol::HNX];

    /// Human-readable label for the tray menu entry.
    pub fn menu_label(&self) -> &'static str {
        match self {
            IndexSymbol::VNINDEX => "VN-Index",
            IndexSymbol::VN30 => "VN30",
            IndexSymbol::HNX => "HNX-Index",
        }
    }
}

impl Default for IndexSymbol {
    fn default() -> Self {
        IndexSymbol::VNINDEX
    }
}
