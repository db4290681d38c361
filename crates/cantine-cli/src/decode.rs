//! CSV decoding for uploaded menu sheets.
//!
//! The sheet arrives as text with a header row naming the columns in
//! [`cantine_core::columns`]. Decoding is structural only: fields are
//! split (quote-aware), mapped by header title, and handed to the
//! engine as loosely-typed cells. Anything wrong with the file itself —
//! no header, missing required columns, ragged rows — is a
//! [`DecodeError`] and surfaces as one processing failure, never as
//! per-row validation errors.

use std::collections::HashMap;

use thiserror::Error;

use cantine_core::{CellValue, RawRow, columns};

/// Errors for structurally unusable sheets.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("the sheet has no header row")]
    MissingHeader,

    #[error("the sheet header is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("row {row} has {found} field(s), expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Decode CSV text into raw sheet rows.
///
/// The first non-blank line is the header; blank lines are skipped.
pub fn decode_csv(content: &str) -> Result<Vec<RawRow>, DecodeError> {
    let mut lines = content.lines().filter(|line| !line.trim().is_empty());

    let header_line = lines.next().ok_or(DecodeError::MissingHeader)?;
    let headers = split_line(header_line);

    let missing: Vec<String> = columns::REQUIRED
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|c| (*c).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(DecodeError::MissingColumns(missing));
    }

    let index: HashMap<&str, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.as_str(), i))
        .collect();

    let mut rows = Vec::new();
    for (offset, line) in lines.enumerate() {
        let fields = split_line(line);
        if fields.len() != headers.len() {
            return Err(DecodeError::RaggedRow {
                row: offset + 1,
                found: fields.len(),
                expected: headers.len(),
            });
        }
        rows.push(map_row(&index, &fields));
    }

    Ok(rows)
}

/// Map one field list onto a [`RawRow`] using the header index.
///
/// Unknown columns are ignored; blank cells become absent.
fn map_row(index: &HashMap<&str, usize>, fields: &[String]) -> RawRow {
    let cell = |column: &str| -> Option<String> {
        index
            .get(column)
            .map(|&i| fields[i].clone())
            .filter(|value| !value.is_empty())
    };

    RawRow {
        date: date_cell(cell(columns::DATE)),
        day_name: cell(columns::DAY_NAME),
        meal_period: cell(columns::MEAL_PERIOD),
        dish_role: cell(columns::DISH_ROLE),
        dish_name: cell(columns::DISH_NAME),
        dish_category: cell(columns::DISH_CATEGORY),
        diet_tags: cell(columns::DIET_TAGS),
        allergen_tags: cell(columns::ALLERGEN_TAGS),
        description: cell(columns::DESCRIPTION),
    }
}

/// A bare numeric `Date` cell is a spreadsheet serial, not text.
fn date_cell(value: Option<String>) -> CellValue {
    match value {
        None => CellValue::Empty,
        Some(text) => match text.parse::<f64>() {
            Ok(serial) => CellValue::Number(serial),
            Err(_) => CellValue::Text(text),
        },
    }
}

/// Split one CSV line into fields, honoring double-quoted fields with
/// `""` escapes. Unquoted fields are trimmed.
fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if !quoted && field.trim().is_empty() => {
                in_quotes = true;
                quoted = true;
                field.clear();
            }
            ',' if !in_quotes => {
                fields.push(finish_field(field, quoted));
                field = String::new();
                quoted = false;
            }
            _ => field.push(c),
        }
    }
    fields.push(finish_field(field, quoted));
    fields
}

fn finish_field(field: String, quoted: bool) -> String {
    if quoted { field } else { field.trim().to_owned() }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
