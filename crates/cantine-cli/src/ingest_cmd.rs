//! `cantine ingest` command: decode a sheet file and print the weekly
//! plan.

use std::path::Path;

use anyhow::{Context, Result, bail};

use cantine_core::{Locale, WeeklyDayPlan, ingest_rows};

use crate::decode;

/// Run the ingest command.
///
/// Rejects non-CSV files before decoding (the caller-side format gate),
/// then decodes, ingests, and prints either a per-dish table or the
/// JSON payload.
pub fn run_ingest(file: &str, locale: Locale, json: bool) -> Result<()> {
    let path = Path::new(file);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if extension.as_deref() != Some("csv") {
        bail!("unsupported file type {file:?}: expected a .csv sheet");
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let rows = decode::decode_csv(&content)
        .with_context(|| format!("failed to process {}", path.display()))?;

    let days = ingest_rows(&rows, locale.namer())?;

    if json {
        let payload = serde_json::json!({ "days": days, "count": days.len() });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    print_plan_table(&days);
    println!();
    println!("{} day plan(s) imported.", days.len());

    Ok(())
}

/// Print one aligned line per planned dish.
fn print_plan_table(days: &[WeeklyDayPlan]) {
    println!(
        "{:<12} {:<10} {:<10} {:<9} {}",
        "DATE", "DAY", "MEAL", "ROLE", "DISH"
    );
    println!("{}", "-".repeat(60));

    for day in days {
        for (meal, slot) in [("lunch", &day.meals.lunch), ("dinner", &day.meals.dinner)] {
            for (role, item) in [
                ("starter", &slot.starter),
                ("main", &slot.main),
                ("dessert", &slot.dessert),
            ] {
                if let Some(item) = item {
                    println!(
                        "{:<12} {:<10} {:<10} {:<9} {}",
                        day.date, day.day_of_week, meal, role, item.name
                    );
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
