//! Time-ranged quotes API client.

use std::time::Duration;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use index_common::error::FetchError;
use index_common::result::Result;
use index_common::source::{DailyRecord, IndexSource, RawPayload};
use index_common::symbols::IndexSymbol;
use isahc::{HttpClient, config::Configurable, prelude::*};
use log::debug;
use serde::Deserialize;

/// Public quotes endpoint serving daily index prices.
const QUOTES_ENDPOINT: &str = "https://finfo-api.vndirect.com.vn/v3/stocks/prices";
/// Calendar days of history requested per fetch.
const LOOKBACK_DAYS: i64 = 14;
/// Upper bound on one HTTP request, so a slow fetch cannot starve the next
/// tick indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Response envelope of the quotes endpoint. Records are ordered oldest to
/// newest; unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct QuotesResponse {
    data: Vec<DailyRecord>,
}

/// API strategy: fetch a two-week window of daily prices for the symbol.
pub struct QuoteApi {
    client: HttpClient,
    endpoint: String,
}

impl QuoteApi {
    /// Build the HTTP client with the request timeout, honoring the
    /// `INDEX_QUOTES_ENDPOINT` environment override.
    pub fn new() -> Result<Self> {
        let client = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let endpoint = std::env::var("INDEX_QUOTES_ENDPOINT")
            .unwrap_or_else(|_| QUOTES_ENDPOINT.to_string());
        Ok(Self { client, endpoint })
    }
}

/// Build the request URL for `symbol` over the `[from, to]` calendar dates.
fn quotes_url(endpoint: &str, symbol: IndexSymbol, from: NaiveDate, to: NaiveDate) -> String {
    format!(
        "{}?symbols={}&fromDate={}&toDate={}",
        endpoint,
        symbol,
        from.format("%Y-%m-%d"),
        to.format("%Y-%m-%d")
    )
}

/// First part of an offending body, enough for diagnostics without dumping
/// pages of JSON into the log.
fn snippet(body: &str) -> String {
    const LIMIT: usize = 200;
    if body.len() <= LIMIT {
        body.to_string()
    } else {
        let mut short: String = body.chars().take(LIMIT).collect();
        short.push('…');
        short
    }
}

impl IndexSource for QuoteApi {
    fn fetch(&self, symbol: IndexSymbol) -> Result<RawPayload> {
        let to = Utc::now().date_naive();
        let from = to - ChronoDuration::days(LOOKBACK_DAYS);
        let url = quotes_url(&self.endpoint, symbol, from, to);
        debug!("GET {}", url);

        let mut response = self
            .client
            .get(url.as_str())
            .map_err(|e| FetchError::Network(e.to_string()))?;
        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "{} returned {}",
                self.endpoint,
                response.status()
            )));
        }
        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let decoded: QuotesResponse =
            serde_json::from_str(&body).map_err(|_| FetchError::ShapeMismatch(snippet(&body)))?;
        Ok(RawPayload::DailyRecords(decoded.data))
    }
}
