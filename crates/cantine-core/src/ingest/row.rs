//! Raw input rows as decoded from an uploaded sheet.
//!
//! Decoders map each sheet row onto a [`RawRow`] using the column titles
//! in [`columns`]. Nothing is validated here: the `Date` cell stays in
//! whatever representation the file stored, and text fields stay loose
//! until the schema check.

use std::fmt;

use chrono::NaiveDateTime;

/// Column titles expected in an uploaded sheet.
pub mod columns {
    pub const DATE: &str = "Date";
    pub const DAY_NAME: &str = "Jour";
    pub const MEAL_PERIOD: &str = "TypeRepas";
    pub const DISH_ROLE: &str = "RolePlat";
    pub const DISH_NAME: &str = "NomPlat";
    pub const DISH_CATEGORY: &str = "CategoriePlat";
    pub const DIET_TAGS: &str = "TagsRegime";
    pub const ALLERGEN_TAGS: &str = "TagsAllergene";
    pub const DESCRIPTION: &str = "DescriptionPlat";

    /// Columns that must be present in the header row.
    pub const REQUIRED: [&str; 5] = [DATE, MEAL_PERIOD, DISH_ROLE, DISH_NAME, DISH_CATEGORY];
}

/// One loosely-typed spreadsheet cell.
///
/// Sheet decoders produce whatever the file format stored: text, a raw
/// number (possibly a spreadsheet serial date), a native date-time, a
/// boolean, or nothing at all.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
    Bool(bool),
    #[default]
    Empty,
}

impl CellValue {
    /// Whether the cell holds no value at all.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Diagnostic rendering used in row error messages.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Empty => Ok(()),
        }
    }
}

/// One row of the uploaded sheet, field-mapped but not yet validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// The `Date` cell, kept untyped until normalization.
    pub date: CellValue,
    /// `Jour` — optional day display name.
    pub day_name: Option<String>,
    /// `TypeRepas` — Déjeuner / Dîner.
    pub meal_period: Option<String>,
    /// `RolePlat` — Principal / Dessert / Entree / Entrée.
    pub dish_role: Option<String>,
    /// `NomPlat` — dish display name.
    pub dish_name: Option<String>,
    /// `CategoriePlat` — starter / main / dessert / drink / snack.
    pub dish_category: Option<String>,
    /// `TagsRegime` — comma-separated diet tags.
    pub diet_tags: Option<String>,
    /// `TagsAllergene` — comma-separated allergen tags.
    pub allergen_tags: Option<String>,
    /// `DescriptionPlat` — optional free text.
    pub description: Option<String>,
}
