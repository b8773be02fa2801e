//! Tray title formatting and delivery.
//!
//! Formatting lives in pure functions so the exact title strings are
//! unit-testable without a tray; `DisplayPresenter` is the thin layer that
//! pushes them to the `TrayDisplay` collaborator. The sentiment glyph shown
//! is always recomputed from the sign of the parsed change, never copied
//! from whatever glyph the upstream source displayed.

use crate::error::FetchError;
use crate::parser::{DOWN_GLYPH, UP_GLYPH};
use crate::reading::IndexReading;
use crate::symbols::IndexSymbol;
use crate::tray::TrayDisplay;

/// Formats readings and errors and pushes them to the tray display.
pub struct DisplayPresenter<D: TrayDisplay> {
    display: D,
}

impl<D: TrayDisplay> DisplayPresenter<D> {
    /// Wrap a tray display collaborator.
    pub fn new(display: D) -> Self {
        Self { display }
    }

    /// Push a successfully parsed reading to the tray title.
    pub fn show_reading(&self, reading: &IndexReading) {
        self.display.set_title(&format_reading(reading));
    }

    /// Push a short error label for a failed refresh cycle.
    pub fn show_error(&self, symbol: IndexSymbol, error: &FetchError) {
        self.display.set_title(&format_error(symbol, error));
    }

    /// Ask the tray collaborator to tear the indicator down.
    pub fn quit(&self) {
        self.display.quit();
    }
}

/// Render a reading as the tray title, e.g. `VNINDEX: 1234.50 🔺0.12%`.
///
/// Value and percent magnitude are rounded to two decimals; the glyph is 🔺
/// for a non-negative change and 🔻 otherwise.
pub fn format_reading(reading: &IndexReading) -> String {
    let glyph = if reading.is_up() { UP_GLYPH } else { DOWN_GLYPH };
    format!(
        "{}: {:.2} {}{:.2}%",
        reading.symbol,
        reading.value,
        glyph,
        reading.change_percent.abs()
    )
}

/// Render a failed cycle as the tray title, e.g. `VN30: Parse Error`.
pub fn format_error(symbol: IndexSymbol, error: &FetchError) -> String {
    format!("{}: {}", symbol, error_label(error))
}

fn error_label(error: &FetchError) -> &'static str {
    match error {
        FetchError::Network(_) | FetchError::RenderTimeout(_) => "Error",
        FetchError::ShapeMismatch(_) | FetchError::NumericParse(_) => "Parse Error",
        FetchError::InsufficientData(_) => "No Data",
    }
}
