//! Date normalization for the `Date` column.
//!
//! Uploaded sheets encode dates as spreadsheet serial numbers, native
//! date cells, ISO strings, or a handful of slash and free-form text
//! layouts. [`normalize_date`] reduces all of them to the canonical
//! `YYYY-MM-DD` aggregation key, stopping at the first representation
//! that succeeds. Text no layout matches is returned unchanged so the
//! row validator rejects it with a precise format error instead of the
//! row disappearing silently.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate};
use regex::Regex;

use super::row::CellValue;

/// Days between the spreadsheet epoch (1899-12-30) and the Unix epoch
/// (1970-01-01).
pub const SERIAL_EPOCH_OFFSET_DAYS: f64 = 25_569.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// Canonical calendar-date shape used as the aggregation key.
pub static CANONICAL_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("canonical date pattern compiles"));

/// Slash-separated layouts, tried in priority order: day-first wins over
/// month-first. chrono's numeric fields accept unpadded digits, so each
/// entry covers both the padded (`dd/MM/yyyy`) and unpadded (`d/M/yyyy`)
/// spellings.
const SLASH_FORMATS: [&str; 2] = ["%d/%m/%Y", "%m/%d/%Y"];

/// Free-form layouts attempted when a string is neither canonical nor
/// slash-separated. RFC 3339 timestamps are tried before these.
const FREEFORM_FORMATS: [&str; 3] = ["%Y/%m/%d", "%d-%m-%Y", "%d.%m.%Y"];

/// Normalize a raw `Date` cell to the canonical `YYYY-MM-DD` form.
///
/// Returns `None` when the cell holds nothing a date could be read from
/// (empty or boolean); returns the original text unchanged when no
/// layout matches, deferring rejection to the row validator.
pub fn normalize_date(cell: &CellValue) -> Option<String> {
    match cell {
        CellValue::Number(serial) => Some(
            serial_to_date(*serial)
                .map(|d| d.format(CANONICAL_FORMAT).to_string())
                .unwrap_or_else(|| serial.to_string()),
        ),
        CellValue::DateTime(dt) => Some(dt.date().format(CANONICAL_FORMAT).to_string()),
        CellValue::Text(s) => Some(normalize_text(s)),
        CellValue::Bool(_) | CellValue::Empty => None,
    }
}

/// Convert a spreadsheet serial day count to a calendar date.
///
/// The serial is shifted by the 25569-day epoch offset, scaled to Unix
/// seconds, and truncated to the UTC calendar day, so the date a
/// spreadsheet displays is the date produced here regardless of the
/// host timezone. Returns `None` for serials outside the representable
/// range.
pub fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() {
        return None;
    }
    let unix_secs = ((serial - SERIAL_EPOCH_OFFSET_DAYS) * SECONDS_PER_DAY).trunc();
    if unix_secs < i64::MIN as f64 || unix_secs > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(unix_secs as i64, 0).map(|dt| dt.date_naive())
}

fn normalize_text(s: &str) -> String {
    let trimmed = s.trim();

    if CANONICAL_DATE_RE.is_match(trimmed) {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, CANONICAL_FORMAT) {
            return date.format(CANONICAL_FORMAT).to_string();
        }
    } else if trimmed.contains('/') {
        for format in SLASH_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return date.format(CANONICAL_FORMAT).to_string();
            }
        }
    } else {
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return dt.date_naive().format(CANONICAL_FORMAT).to_string();
        }
        for format in FREEFORM_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return date.format(CANONICAL_FORMAT).to_string();
            }
        }
    }

    // No layout matched; hand the original text to the validator.
    s.to_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
