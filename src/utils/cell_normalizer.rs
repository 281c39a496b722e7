//! Tolerant conversion of spreadsheet cells into dates, amounts, flags and text.
//!
//! Every function here degrades to "absent" (or `false` / empty) instead of
//! failing: a malformed cell never aborts an import.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::domain::sheet::CellValue;

/// Whitespace, thousands separators and currency symbols, stripped from amounts.
static AMOUNT_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,'\p{Sc}]").expect("static regex"));

/// Text layouts accepted for dates, tried in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d-%b-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Last serial the 1900 date system can represent (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

/// Serial numbers above this value sit after the phantom 1900-02-29.
const LEAP_BUG_SERIAL: i64 = 59;

/// Converts a 1900-system spreadsheet serial into a calendar date.
///
/// Serial 1 is 1900-01-01. The format counts 1900 as a leap year, so every
/// serial after 59 is one day ahead of the real calendar and gets corrected.
/// Fractions (time of day) are discarded. Returns `None` for serials below 1,
/// beyond 9999-12-31, or non-finite input.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_SERIAL {
        return None;
    }

    let days = serial.floor() as i64;
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 31)?;
    let date = epoch.checked_add_signed(Duration::days(days))?;

    if days > LEAP_BUG_SERIAL {
        date.checked_sub_signed(Duration::days(1))
    } else {
        Some(date)
    }
}

/// Parses a date from free text.
///
/// Accepts the layouts in [`DATE_FORMATS`], common date-time layouts, RFC 3339
/// timestamps and bare numbers (treated as serials).
pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(serial) = s.parse::<f64>() {
        return serial_to_date(serial);
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Normalizes a cell into a calendar date, `None` when absent or unparseable.
pub fn normalize_date(cell: &CellValue) -> Option<NaiveDate> {
    match cell {
        CellValue::Empty | CellValue::Bool(_) => None,
        CellValue::Date(date) => Some(*date),
        CellValue::Number(n) | CellValue::DateSerial(n) => serial_to_date(*n),
        CellValue::Text(s) => parse_date_text(s),
    }
}

/// Normalizes a cell into a monetary amount, `None` when absent or unparseable.
///
/// Text has whitespace, thousands separators and currency symbols stripped
/// before parsing (`"$1,250.50"` becomes `1250.50`).
pub fn normalize_amount(cell: &CellValue) -> Option<Decimal> {
    match cell {
        CellValue::Number(n) => {
            if !n.is_finite() {
                return None;
            }
            Decimal::from_str(&n.to_string()).ok()
        }
        CellValue::Text(s) => {
            let cleaned = AMOUNT_NOISE.replace_all(s, "");
            if cleaned.is_empty() {
                return None;
            }
            Decimal::from_str(&cleaned).ok()
        }
        CellValue::Empty | CellValue::Bool(_) | CellValue::Date(_) | CellValue::DateSerial(_) => {
            None
        }
    }
}

/// Interprets a yes/no cell.
pub fn normalize_flag(cell: &CellValue) -> bool {
    match cell {
        CellValue::Bool(b) => *b,
        CellValue::Number(n) => *n != 0.0,
        CellValue::Text(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true" | "1"
        ),
        CellValue::Empty | CellValue::Date(_) | CellValue::DateSerial(_) => false,
    }
}

/// Renders a cell as text, verbatim for text cells.
///
/// Whole numbers lose their trailing `.0`; date cells render as `YYYY-MM-DD`.
pub fn cell_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Number(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                (*n as i64).to_string()
            } else {
                n.to_string()
            }
        }
        CellValue::Bool(b) => b.to_string(),
        CellValue::Date(date) => date.format("%Y-%m-%d").to_string(),
        CellValue::DateSerial(n) => serial_to_date(*n)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| n.to_string()),
    }
}
