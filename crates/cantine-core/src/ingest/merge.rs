//! Folding validated rows into per-day plans.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::locale::{WeekdayNamer, capitalize_first};
use crate::model::{DayMeals, PlannedMealItem, WeeklyDayPlan, split_tags};

use super::validate::ValidatedRow;

/// Fold one validated row into the plan map.
///
/// The first row seen for a date creates its [`WeeklyDayPlan`]; every
/// row then lands in the slot chosen by its meal period and role. A
/// later row for the same (date, meal, role) replaces the earlier one.
///
/// Returns an error message when the plan would be created but no
/// weekday name can be derived for the date.
pub fn merge_row(
    plans: &mut BTreeMap<String, WeeklyDayPlan>,
    row: ValidatedRow,
    namer: &dyn WeekdayNamer,
) -> Result<(), String> {
    let plan = match plans.entry(row.date.clone()) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            // The label is fixed here, at first encounter, and never
            // recomputed for later rows of the same date.
            let day_of_week = match &row.day_name {
                Some(name) => capitalize_first(name),
                None => derive_day_name(&row.date, namer)?,
            };
            entry.insert(WeeklyDayPlan {
                date: row.date.clone(),
                day_of_week,
                meals: DayMeals::default(),
            })
        }
    };

    let item = PlannedMealItem {
        name: row.dish_name,
        category: row.dish_category,
        diet_tags: split_tags(row.diet_tags.as_deref()),
        allergen_tags: split_tags(row.allergen_tags.as_deref()),
        description: row.description,
    };

    let slot = plan.meals.slot_mut(row.meal_period);
    if let Some(previous) = slot.assign(row.dish_role, item) {
        debug!(
            date = %plan.date,
            meal = %row.meal_period,
            role = %row.dish_role,
            replaced = %previous.name,
            "duplicate dish entry replaced an earlier row"
        );
    }

    Ok(())
}

/// Derive the capitalized weekday display name for a canonical date.
///
/// Validation only checks the date's shape, so a `2024-13-01` can reach
/// this point; it has no weekday and is reported as a row problem.
fn derive_day_name(date: &str, namer: &dyn WeekdayNamer) -> Result<String, String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| format!("cannot derive a weekday name from date {date:?}"))?;
    Ok(capitalize_first(namer.weekday_name(parsed.weekday())))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
