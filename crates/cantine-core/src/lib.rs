//! Core ingestion engine for care-facility weekly menu plans.
//!
//! The engine consumes loosely-typed rows decoded from an uploaded
//! spreadsheet and reconciles them into an ordered, validated sequence
//! of per-day menu plans. File decoding, persistence, and presentation
//! belong to the callers; this crate is pure and synchronous.

pub mod ingest;
pub mod locale;
pub mod model;

pub use ingest::row::{CellValue, RawRow, columns};
pub use ingest::validate::{FieldIssue, RowError};
pub use ingest::{IngestError, ingest_rows};
pub use locale::{
    EnglishWeekdayNames, FrenchWeekdayNames, Locale, WeekdayNamer, capitalize_first,
};
pub use model::{
    DayMeals, DishCategory, DishRole, MealPeriod, MealSlot, PlannedMealItem, WeeklyDayPlan,
    split_tags,
};
