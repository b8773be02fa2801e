//! Headless-browser scrape of the exchange priceboard.
//!
//! A fresh browser is launched per fetch and torn down with it, so one
//! failed render never poisons the next cycle.

use std::time::Duration;

use headless_chrome::{Browser, LaunchOptions};
use index_common::error::FetchError;
use index_common::result::Result;
use index_common::source::{IndexSource, RawPayload};
use index_common::symbols::IndexSymbol;
use log::debug;

/// Dashboard rendering the index chart panels.
const PRICEBOARD_URL: &str = "https://xpower.vixs.vn/priceboard";
/// Chart-detail element of the first panel, e.g. `1,234.56 🔺0.12 (0.01%)`.
const CHART_DETAIL_SELECTOR: &str =
    "#charts-wrapper > div > div > div:nth-child(1) > div.chart-info > div.chart-info-detail > span";
/// Upper bound on waiting for the chart panel to render.
const RENDER_TIMEOUT: Duration = Duration::from_secs(20);

/// Scrape strategy: drive a headless browser to the priceboard and read the
/// rendered chart-detail text.
pub struct BoardScraper {
    url: String,
}

impl BoardScraper {
    /// Create a scraper for the default priceboard, honoring the
    /// `INDEX_BOARD_URL` environment override.
    pub fn new() -> Self {
        let url = std::env::var("INDEX_BOARD_URL").unwrap_or_else(|_| PRICEBOARD_URL.to_string());
        Self { url }
    }
}

impl Default for BoardScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexSource for BoardScraper {
    // The priceboard renders the first chart panel into the awaited element
    // no matter which index is selected; `symbol` only labels the result.
    // Known mismatch in the upstream dashboard contract.
    fn fetch(&self, symbol: IndexSymbol) -> Result<RawPayload> {
        debug!("Scraping {} for {}", self.url, symbol);

        let options = LaunchOptions::default_builder()
            .headless(true)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let browser = Browser::new(options).map_err(|e| FetchError::Network(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        tab.navigate_to(&self.url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let element = tab
            .wait_for_element_with_custom_timeout(CHART_DETAIL_SELECTOR, RENDER_TIMEOUT)
            .map_err(|_| FetchError::RenderTimeout(CHART_DETAIL_SELECTOR.to_string()))?;
        let text = element
            .get_inner_text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Chart detail text: {}", text);
        Ok(RawPayload::BoardText(text))
    }
}
