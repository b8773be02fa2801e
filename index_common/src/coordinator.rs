//! Selected-symbol state and the fetch → parse → display cycle.
//!
//! The coordinator owns the only mutable piece of process state, the
//! currently selected `IndexSymbol`, and runs every refresh inline on the
//! caller's (single consumer) thread, so cycles never overlap. Each cycle
//! captures the symbol before fetching; a selection applied by a later
//! trigger can never change the attribution of a cycle already in flight.
//! Failures are logged and turned into a tray label here; none escape.

use log::{error, info};

use crate::parser;
use crate::presenter::DisplayPresenter;
use crate::source::IndexSource;
use crate::symbols::IndexSymbol;
use crate::tray::TrayDisplay;

/// Drives the refresh pipeline against the currently selected symbol.
pub struct RefreshCoordinator<S: IndexSource, D: TrayDisplay> {
    source: S,
    presenter: DisplayPresenter<D>,
    current: IndexSymbol,
}

impl<S: IndexSource, D: TrayDisplay> RefreshCoordinator<S, D> {
    /// Create a coordinator starting at the default symbol.
    pub fn new(source: S, presenter: DisplayPresenter<D>) -> Self {
        Self {
            source,
            presenter,
            current: IndexSymbol::default(),
        }
    }

    /// Symbol the next refresh will be attributed to.
    pub fn current(&self) -> IndexSymbol {
        self.current
    }

    /// Switch the selected symbol, then refresh immediately.
    pub fn select_index(&mut self, symbol: IndexSymbol) {
        info!("Switching index to {}", symbol);
        self.current = symbol;
        self.refresh();
    }

    /// Run one full fetch → parse → display cycle for the selected symbol.
    ///
    /// Blocks for at most the source's own timeout. Every failure class is
    /// converted into a short tray label; nothing is propagated or retried.
    /// The next trigger (tick or user action) gets a fresh attempt.
    pub fn refresh(&mut self) {
        let symbol = self.current;
        let outcome = self
            .source
            .fetch(symbol)
            .and_then(|payload| parser::parse(symbol, payload));

        match outcome {
            Ok(reading) => {
                info!(
                    "{}: value={:.2} change={:+.2} ({:+.2}%)",
                    symbol, reading.value, reading.change, reading.change_percent
                );
                self.presenter.show_reading(&reading);
            }
            Err(e) => {
                error!("Refresh for {} failed: {}", symbol, e);
                self.presenter.show_error(symbol, &e);
            }
        }
    }

    /// Tear down the display collaborator on shutdown.
    pub fn quit(&self) {
        self.presenter.quit();
    }
}
