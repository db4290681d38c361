use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Service window a dish is planned for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealPeriod {
    Lunch,
    Dinner,
}

impl fmt::Display for MealPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Lunch => "Déjeuner",
            Self::Dinner => "Dîner",
        };
        f.write_str(s)
    }
}

impl FromStr for MealPeriod {
    type Err = MealPeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Déjeuner" => Ok(Self::Lunch),
            "Dîner" => Ok(Self::Dinner),
            other => Err(MealPeriodParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`MealPeriod`] string.
#[derive(Debug, Clone)]
pub struct MealPeriodParseError(pub String);

impl fmt::Display for MealPeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid meal period {:?} (expected Déjeuner or Dîner)",
            self.0
        )
    }
}

impl std::error::Error for MealPeriodParseError {}

// ---------------------------------------------------------------------------

/// Course position of a dish within a meal period.
///
/// Parsing is case-insensitive over an explicit equivalence table:
/// sheets in the wild write both the accented and unaccented spellings
/// of "entrée".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishRole {
    Starter,
    Main,
    Dessert,
}

impl fmt::Display for DishRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Starter => "Entrée",
            Self::Main => "Principal",
            Self::Dessert => "Dessert",
        };
        f.write_str(s)
    }
}

impl FromStr for DishRole {
    type Err = DishRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "principal" => Ok(Self::Main),
            "dessert" => Ok(Self::Dessert),
            "entree" | "entrée" => Ok(Self::Starter),
            _ => Err(DishRoleParseError(s.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`DishRole`] string.
#[derive(Debug, Clone)]
pub struct DishRoleParseError(pub String);

impl fmt::Display for DishRoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid dish role {:?} (expected Principal, Dessert, Entree, or Entrée)",
            self.0
        )
    }
}

impl std::error::Error for DishRoleParseError {}

// ---------------------------------------------------------------------------

/// Menu category of a dish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishCategory {
    Starter,
    Main,
    Dessert,
    Drink,
    Snack,
}

impl fmt::Display for DishCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Starter => "starter",
            Self::Main => "main",
            Self::Dessert => "dessert",
            Self::Drink => "drink",
            Self::Snack => "snack",
        };
        f.write_str(s)
    }
}

impl FromStr for DishCategory {
    type Err = DishCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "starter" => Ok(Self::Starter),
            "main" => Ok(Self::Main),
            "dessert" => Ok(Self::Dessert),
            "drink" => Ok(Self::Drink),
            "snack" => Ok(Self::Snack),
            other => Err(DishCategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`DishCategory`] string.
#[derive(Debug, Clone)]
pub struct DishCategoryParseError(pub String);

impl fmt::Display for DishCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid dish category {:?} (expected starter, main, dessert, drink, or snack)",
            self.0
        )
    }
}

impl std::error::Error for DishCategoryParseError {}

// ---------------------------------------------------------------------------
// Plan structs
// ---------------------------------------------------------------------------

/// A validated dish entry, owned by the meal slot that contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedMealItem {
    pub name: String,
    pub category: DishCategory,
    #[serde(default)]
    pub diet_tags: Vec<String>,
    #[serde(default)]
    pub allergen_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Up to one planned item per course role. A slot stays partially filled
/// when not every role appears in the sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starter: Option<PlannedMealItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main: Option<PlannedMealItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dessert: Option<PlannedMealItem>,
}

impl MealSlot {
    /// Assign `item` to the attribute selected by `role`, returning the
    /// previous occupant if the role was already filled.
    pub fn assign(&mut self, role: DishRole, item: PlannedMealItem) -> Option<PlannedMealItem> {
        let target = match role {
            DishRole::Starter => &mut self.starter,
            DishRole::Main => &mut self.main,
            DishRole::Dessert => &mut self.dessert,
        };
        target.replace(item)
    }
}

/// The two service windows of one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayMeals {
    pub lunch: MealSlot,
    pub dinner: MealSlot,
}

impl DayMeals {
    /// The mutable slot for a meal period.
    pub fn slot_mut(&mut self, period: MealPeriod) -> &mut MealSlot {
        match period {
            MealPeriod::Lunch => &mut self.lunch,
            MealPeriod::Dinner => &mut self.dinner,
        }
    }
}

/// One day of the weekly plan, keyed by its canonical `YYYY-MM-DD` date.
///
/// The weekday label is fixed at the first row seen for the date and
/// never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyDayPlan {
    pub date: String,
    pub day_of_week: String,
    pub meals: DayMeals,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Split a comma-separated tag cell into trimmed, non-empty tags,
/// preserving their order.
pub fn split_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect()
    })
    .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_period_display_roundtrip() {
        for v in [MealPeriod::Lunch, MealPeriod::Dinner] {
            let parsed: MealPeriod = v.to_string().parse().expect("should parse");
            assert_eq!(v, parsed);
        }
    }

    #[test]
    fn meal_period_is_exact_match() {
        assert!("déjeuner".parse::<MealPeriod>().is_err());
        assert!("Brunch".parse::<MealPeriod>().is_err());
    }

    #[test]
    fn dish_role_accepts_both_starter_spellings() {
        assert_eq!("Entree".parse::<DishRole>().unwrap(), DishRole::Starter);
        assert_eq!("Entrée".parse::<DishRole>().unwrap(), DishRole::Starter);
    }

    #[test]
    fn dish_role_is_case_insensitive() {
        assert_eq!("PRINCIPAL".parse::<DishRole>().unwrap(), DishRole::Main);
        assert_eq!("dessert".parse::<DishRole>().unwrap(), DishRole::Dessert);
        assert_eq!("ENTRÉE".parse::<DishRole>().unwrap(), DishRole::Starter);
    }

    #[test]
    fn dish_role_invalid() {
        let err = "Accompagnement".parse::<DishRole>().unwrap_err();
        assert!(
            err.to_string().contains("Accompagnement"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn dish_category_display_roundtrip() {
        let variants = [
            DishCategory::Starter,
            DishCategory::Main,
            DishCategory::Dessert,
            DishCategory::Drink,
            DishCategory::Snack,
        ];
        for v in variants {
            let parsed: DishCategory = v.to_string().parse().expect("should parse");
            assert_eq!(v, parsed);
        }
    }

    #[test]
    fn dish_category_invalid() {
        assert!("invalid".parse::<DishCategory>().is_err());
        assert!("Main".parse::<DishCategory>().is_err(), "categories are lowercase");
    }

    #[test]
    fn split_tags_trims_and_drops_empties() {
        let tags = split_tags(Some("Sans sel,  Diabétique ,"));
        assert_eq!(tags, vec!["Sans sel", "Diabétique"]);
    }

    #[test]
    fn split_tags_preserves_order() {
        let tags = split_tags(Some("b,a,c"));
        assert_eq!(tags, vec!["b", "a", "c"]);
    }

    #[test]
    fn split_tags_none_is_empty() {
        assert!(split_tags(None).is_empty());
        assert!(split_tags(Some("")).is_empty());
        assert!(split_tags(Some(" , ,")).is_empty());
    }

    #[test]
    fn meal_slot_assign_returns_previous_occupant() {
        let item = |name: &str| PlannedMealItem {
            name: name.to_owned(),
            category: DishCategory::Main,
            diet_tags: vec![],
            allergen_tags: vec![],
            description: None,
        };

        let mut slot = MealSlot::default();
        assert!(slot.assign(DishRole::Main, item("Poulet")).is_none());
        let previous = slot.assign(DishRole::Main, item("Boeuf"));
        assert_eq!(previous.unwrap().name, "Poulet");
        assert_eq!(slot.main.as_ref().unwrap().name, "Boeuf");
        assert!(slot.starter.is_none());
        assert!(slot.dessert.is_none());
    }

    #[test]
    fn plan_serializes_without_empty_roles() {
        let plan = WeeklyDayPlan {
            date: "2024-07-29".to_owned(),
            day_of_week: "Lundi".to_owned(),
            meals: DayMeals::default(),
        };
        let json = serde_json::to_value(&plan).expect("should serialize");
        assert_eq!(json["date"], "2024-07-29");
        assert_eq!(json["day_of_week"], "Lundi");
        assert_eq!(json["meals"]["lunch"], serde_json::json!({}));
    }
}
