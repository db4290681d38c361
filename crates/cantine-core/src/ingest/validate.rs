//! Row-level schema validation.
//!
//! Each raw row, with its date replaced by the normalized form, is
//! checked field by field. Every problem is reported rather than just
//! the first, so one upload returns a whole sheet's worth of mistakes.

use std::fmt;
use std::str::FromStr;

use crate::model::{DishCategory, DishRole, MealPeriod};

use super::date::CANONICAL_DATE_RE;
use super::row::{RawRow, columns};

// ---------------------------------------------------------------------------
// Validated row
// ---------------------------------------------------------------------------

/// A row that passed schema validation, every field coerced to its
/// domain type.
#[derive(Debug, Clone)]
pub struct ValidatedRow {
    /// Canonical `YYYY-MM-DD` aggregation key.
    pub date: String,
    pub day_name: Option<String>,
    pub meal_period: MealPeriod,
    pub dish_role: DishRole,
    pub dish_name: String,
    pub dish_category: DishCategory,
    pub diet_tags: Option<String>,
    pub allergen_tags: Option<String>,
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A single field-level problem within a row.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    /// Sheet column the problem applies to.
    pub field: &'static str,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.field, self.message)
    }
}

/// Everything that went wrong with one sheet row.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based index of the data row within the sheet.
    pub row: usize,
    /// The raw `Date` cell as uploaded.
    pub raw_date: String,
    /// The normalized date, when normalization produced one.
    pub processed_date: Option<String>,
    /// Field problems, in column order.
    pub issues: Vec<FieldIssue>,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Row {} (original date: '{}', processed date: '{}'): ",
            self.row,
            self.raw_date,
            self.processed_date.as_deref().unwrap_or("N/A"),
        )?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate one row against the sheet schema.
///
/// `processed_date` is the output of date normalization for the row's
/// `Date` cell. Returns the typed row, or every field issue found.
pub fn validate_row(
    row: &RawRow,
    processed_date: Option<&str>,
) -> Result<ValidatedRow, Vec<FieldIssue>> {
    let mut issues = Vec::new();

    let date = match processed_date {
        Some(d) if CANONICAL_DATE_RE.is_match(d) => Some(d.to_owned()),
        Some(d) => {
            issues.push(FieldIssue::new(
                columns::DATE,
                format!("unrecognized date format {d:?}, expected YYYY-MM-DD"),
            ));
            None
        }
        None => {
            issues.push(FieldIssue::new(columns::DATE, "required field is missing"));
            None
        }
    };

    let meal_period =
        parse_field::<MealPeriod>(row.meal_period.as_deref(), columns::MEAL_PERIOD, &mut issues);
    let dish_role =
        parse_field::<DishRole>(row.dish_role.as_deref(), columns::DISH_ROLE, &mut issues);
    let dish_category = parse_field::<DishCategory>(
        row.dish_category.as_deref(),
        columns::DISH_CATEGORY,
        &mut issues,
    );

    let dish_name = match row.dish_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Some(name.to_owned()),
        Some(_) => {
            issues.push(FieldIssue::new(columns::DISH_NAME, "must not be empty"));
            None
        }
        None => {
            issues.push(FieldIssue::new(
                columns::DISH_NAME,
                "required field is missing",
            ));
            None
        }
    };

    match (date, meal_period, dish_role, dish_name, dish_category) {
        (Some(date), Some(meal_period), Some(dish_role), Some(dish_name), Some(dish_category))
            if issues.is_empty() =>
        {
            Ok(ValidatedRow {
                date,
                day_name: non_empty(row.day_name.as_deref()),
                meal_period,
                dish_role,
                dish_name,
                dish_category,
                diet_tags: non_empty(row.diet_tags.as_deref()),
                allergen_tags: non_empty(row.allergen_tags.as_deref()),
                description: non_empty(row.description.as_deref()),
            })
        }
        _ => Err(issues),
    }
}

/// Parse a required enum field, recording a missing-or-invalid issue.
fn parse_field<T: FromStr>(
    value: Option<&str>,
    column: &'static str,
    issues: &mut Vec<FieldIssue>,
) -> Option<T>
where
    T::Err: fmt::Display,
{
    match value {
        None => {
            issues.push(FieldIssue::new(column, "required field is missing"));
            None
        }
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                issues.push(FieldIssue::new(column, err.to_string()));
                None
            }
        },
    }
}

/// Trim an optional text field, mapping blank to absent.
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
