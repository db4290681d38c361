//! The weekly menu ingestion engine.
//!
//! [`ingest_rows`] turns a decoded sheet (one row per dish, meal period,
//! and day) into an ordered sequence of per-day plans:
//!
//! 1. the `Date` cell is normalized to the canonical `YYYY-MM-DD` key;
//! 2. the row is validated against the sheet schema, accumulating every
//!    field problem;
//! 3. valid rows fold into one [`WeeklyDayPlan`] per distinct date.
//!
//! Row problems never stop the scan — they are collected so one upload
//! reports every mistake at once — but a single bad row fails the whole
//! batch: a menu with silently missing entries must never be applied.

pub mod date;
pub mod merge;
pub mod row;
pub mod validate;

use std::collections::BTreeMap;

use thiserror::Error;

use crate::locale::WeekdayNamer;
use crate::model::WeeklyDayPlan;

use row::{RawRow, columns};
use validate::{FieldIssue, RowError};

/// Errors produced by one ingestion call.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The uploaded sheet decoded to zero rows.
    #[error("no data found in the uploaded sheet")]
    EmptySheet,

    /// Rows were present but none produced a day plan.
    #[error("no valid menu plan could be extracted from the sheet")]
    NoPlanExtracted,

    /// One or more rows failed validation; nothing was imported.
    #[error("{}", render_row_errors(.0))]
    InvalidRows(Vec<RowError>),
}

fn render_row_errors(errors: &[RowError]) -> String {
    let lines: Vec<String> = errors.iter().map(RowError::to_string).collect();
    format!(
        "{} row(s) failed validation:\n{}",
        errors.len(),
        lines.join("\n")
    )
}

/// Ingest decoded sheet rows into an ordered weekly plan.
///
/// Returns the per-day plans sorted ascending by canonical date, or the
/// full failure report. All-or-nothing: a single invalid row rejects
/// the whole upload and no partial plan escapes.
pub fn ingest_rows(
    rows: &[RawRow],
    namer: &dyn WeekdayNamer,
) -> Result<Vec<WeeklyDayPlan>, IngestError> {
    if rows.is_empty() {
        return Err(IngestError::EmptySheet);
    }

    let mut plans: BTreeMap<String, WeeklyDayPlan> = BTreeMap::new();
    let mut errors: Vec<RowError> = Vec::new();

    for (index, raw) in rows.iter().enumerate() {
        let row_number = index + 1;
        let processed = date::normalize_date(&raw.date);

        match validate::validate_row(raw, processed.as_deref()) {
            Ok(valid) => {
                let processed_date = valid.date.clone();
                if let Err(message) = merge::merge_row(&mut plans, valid, namer) {
                    errors.push(RowError {
                        row: row_number,
                        raw_date: raw.date.to_string(),
                        processed_date: Some(processed_date),
                        issues: vec![FieldIssue::new(columns::DAY_NAME, message)],
                    });
                }
            }
            Err(issues) => {
                errors.push(RowError {
                    row: row_number,
                    raw_date: raw.date.to_string(),
                    processed_date: processed,
                    issues,
                });
            }
        }
    }

    if !errors.is_empty() {
        return Err(IngestError::InvalidRows(errors));
    }
    if plans.is_empty() {
        return Err(IngestError::NoPlanExtracted);
    }

    // BTreeMap iterates keys ascending; zero-padded ISO dates make the
    // lexicographic order the calendar order.
    Ok(plans.into_values().collect())
}
