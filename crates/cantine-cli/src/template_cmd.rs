//! `cantine template` command: emit a sample sheet with the expected
//! columns.

use anyhow::{Context, Result};

use cantine_core::columns;

/// Sample data rows shipped with the template.
const SAMPLE_ROWS: [&str; 4] = [
    "2024-07-29,lundi,Déjeuner,Entrée,Salade de tomates,starter,Végétarien,,Tomates du potager",
    "2024-07-29,lundi,Déjeuner,Principal,Poulet rôti,main,\"Sans sel, Diabétique\",,Avec haricots verts",
    "2024-07-29,lundi,Déjeuner,Dessert,Compote de pommes,dessert,,fruits à coque,",
    "2024-07-29,lundi,Dîner,Principal,Gratin de courgettes,main,Végétarien,lait,",
];

/// Build the template CSV content.
pub fn template_content() -> String {
    let header = [
        columns::DATE,
        columns::DAY_NAME,
        columns::MEAL_PERIOD,
        columns::DISH_ROLE,
        columns::DISH_NAME,
        columns::DISH_CATEGORY,
        columns::DIET_TAGS,
        columns::ALLERGEN_TAGS,
        columns::DESCRIPTION,
    ]
    .join(",");

    let mut content = String::with_capacity(512);
    content.push_str(&header);
    for row in SAMPLE_ROWS {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    content
}

/// Run the template command, writing to `output` or stdout.
pub fn run_template(output: Option<&str>) -> Result<()> {
    let content = template_content();
    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("failed to write {path}"))?;
            println!("Template written to {path}");
        }
        None => print!("{content}"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
