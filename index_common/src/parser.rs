//! Conversion of raw payloads into a normalized `IndexReading`.
//!
//! The board-text branch applies a single regular expression that is treated
//! as a documented contract with the priceboard markup:
//!
//! ```text
//! <value with thousands separators> <glyph><change> (<change percent>%)
//! ```
//!
//! e.g. `1,234.56 🔺0.12 (0.01%)`, where the glyph is 🔺 for up or 🔻 for
//! down. The daily-records branch derives value and change from the two most
//! recent closes. In both branches the sign carried by the reading is what
//! drives display sentiment later; glyphs found in source data are never
//! forwarded verbatim.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FetchError;
use crate::reading::IndexReading;
use crate::result::Result;
use crate::source::{DailyRecord, RawPayload};
use crate::symbols::IndexSymbol;

/// Glyph denoting an upward move.
pub const UP_GLYPH: &str = "🔺";
/// Glyph denoting a downward move.
pub const DOWN_GLYPH: &str = "🔻";

/// Pattern contract for the chart-detail text. Any sentiment glyph other
/// than 🔻 is treated as "up", matching the observed board behavior.
static BOARD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([\d,\.]+) ([\p{Sm}\p{So}])([\d\.]+) \(([\d\.]+)%\)")
        .expect("board pattern must compile")
});

/// Parse a strategy-specific payload into a reading attributed to `symbol`.
pub fn parse(symbol: IndexSymbol, payload: RawPayload) -> Result<IndexReading> {
    match payload {
        RawPayload::BoardText(text) => parse_board_text(symbol, &text),
        RawPayload::DailyRecords(records) => derive_from_records(symbol, &records),
    }
}

fn parse_board_text(symbol: IndexSymbol, text: &str) -> Result<IndexReading> {
    let captures = BOARD_PATTERN
        .captures(text)
        .ok_or_else(|| FetchError::ShapeMismatch(text.to_string()))?;

    let value = parse_number(&captures[1].replace(',', ""))?;
    let mut change = parse_number(&captures[3])?;
    let mut change_percent = parse_number(&captures[4])?;

    if &captures[2] == DOWN_GLYPH {
        change = -change;
        change_percent = -change_percent;
    }

    Ok(IndexReading {
        symbol,
        value,
        change,
        change_percent,
    })
}

fn parse_number(raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| FetchError::NumericParse(raw.to_string()))
}

fn derive_from_records(symbol: IndexSymbol, records: &[DailyRecord]) -> Result<IndexReading> {
    let (previous, latest) = match records {
        [.., previous, latest] => (previous, latest),
        _ => return Err(FetchError::InsufficientData(records.len())),
    };
    if previous.close <= 0.0 || latest.close <= 0.0 {
        return Err(FetchError::ShapeMismatch(format!(
            "non-positive close in last records: {} then {}",
            previous.close, latest.close
        )));
    }

    let change = latest.close - previous.close;
    Ok(IndexReading {
        symbol,
        value: latest.close,
        change,
        change_percent: change / previous.close * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> RawPayload {
        RawPayload::BoardText(text.to_string())
    }

    fn records(closes: &[f64]) -> RawPayload {
        RawPayload::DailyRecords(
            closes
                .iter()
                .map(|&close| DailyRecord { open: close, close })
                .collect(),
        )
    }

    #[test]
    fn test_board_text_up() {
        let reading = parse(IndexSymbol::VNINDEX, board("1,234.56 🔺0.12 (0.01%)")).unwrap();
        assert_eq!(reading.symbol, IndexSymbol::VNINDEX);
        assert_eq!(reading.value, 1234.56);
        assert_eq!(reading.change, 0.12);
        assert_eq!(reading.change_percent, 0.01);
        assert!(reading.is_up());
    }

    #[test]
    fn test_board_text_down_negates_both_deltas() {
        let reading = parse(IndexSymbol::HNX, board("234.56 🔻1.20 (0.51%)")).unwrap();
        assert_eq!(reading.value, 234.56);
        assert_eq!(reading.change, -1.20);
        assert_eq!(reading.change_percent, -0.51);
        assert_eq!(reading.change.signum(), reading.change_percent.signum());
    }

    #[test]
    fn test_board_text_embedded_in_surrounding_text() {
        let reading = parse(
            IndexSymbol::VNINDEX,
            board("VNINDEX  1,254.89 🔺3.15 (0.25%)  KLGD 812,345"),
        )
        .unwrap();
        assert_eq!(reading.value, 1254.89);
        assert_eq!(reading.change, 3.15);
    }

    #[test]
    fn test_malformed_board_text_is_shape_mismatch() {
        let err = parse(IndexSymbol::VNINDEX, board("Đang tải dữ liệu...")).unwrap_err();
        match err {
            FetchError::ShapeMismatch(raw) => assert!(raw.contains("Đang tải")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unparsable_value_is_numeric_parse() {
        let err = parse(IndexSymbol::VNINDEX, board("1.2.3 🔺0.12 (0.01%)")).unwrap_err();
        assert!(matches!(err, FetchError::NumericParse(_)));
    }

    #[test]
    fn test_records_change_from_last_two_closes() {
        let reading = parse(IndexSymbol::VN30, records(&[1000.0, 1100.0, 1210.0])).unwrap();
        assert_eq!(reading.value, 1210.0);
        assert_eq!(reading.change, 110.0);
        assert!((reading.change_percent - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_records_negative_change() {
        let reading = parse(IndexSymbol::VN30, records(&[110.0, 99.0])).unwrap();
        assert_eq!(reading.change, -11.0);
        assert!((reading.change_percent + 10.0).abs() < 1e-9);
        assert!(!reading.is_up());
        assert_eq!(reading.change.signum(), reading.change_percent.signum());
    }

    #[test]
    fn test_single_record_is_insufficient() {
        let err = parse(IndexSymbol::HNX, records(&[100.0])).unwrap_err();
        assert!(matches!(err, FetchError::InsufficientData(1)));
    }

    #[test]
    fn test_empty_records_are_insufficient() {
        let err = parse(IndexSymbol::HNX, records(&[])).unwrap_err();
        assert!(matches!(err, FetchError::InsufficientData(0)));
    }

    #[test]
    fn test_non_positive_close_is_shape_mismatch() {
        let err = parse(IndexSymbol::VNINDEX, records(&[0.0, 100.0])).unwrap_err();
        assert!(matches!(err, FetchError::ShapeMismatch(_)));
    }
}
