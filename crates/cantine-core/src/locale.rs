//! Locale-aware weekday naming.
//!
//! Weekday display names go through the [`WeekdayNamer`] trait so that
//! ingestion is deterministic under any host locale and tests can pick a
//! locale explicitly instead of inheriting the environment's.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Maps a weekday to its display name in some language.
///
/// Implementations return the lowercase form; callers capitalize at the
/// display site.
pub trait WeekdayNamer: Send + Sync {
    fn weekday_name(&self, weekday: Weekday) -> &'static str;
}

/// French weekday names, the default for uploaded sheets.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrenchWeekdayNames;

impl WeekdayNamer for FrenchWeekdayNames {
    fn weekday_name(&self, weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Mon => "lundi",
            Weekday::Tue => "mardi",
            Weekday::Wed => "mercredi",
            Weekday::Thu => "jeudi",
            Weekday::Fri => "vendredi",
            Weekday::Sat => "samedi",
            Weekday::Sun => "dimanche",
        }
    }
}

/// English weekday names.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishWeekdayNames;

impl WeekdayNamer for EnglishWeekdayNames {
    fn weekday_name(&self, weekday: Weekday) -> &'static str {
        match weekday {
            Weekday::Mon => "monday",
            Weekday::Tue => "tuesday",
            Weekday::Wed => "wednesday",
            Weekday::Thu => "thursday",
            Weekday::Fri => "friday",
            Weekday::Sat => "saturday",
            Weekday::Sun => "sunday",
        }
    }
}

// ---------------------------------------------------------------------------

/// Supported weekday-name locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
}

impl Locale {
    /// The weekday namer for this locale.
    pub fn namer(self) -> &'static dyn WeekdayNamer {
        match self {
            Self::Fr => &FrenchWeekdayNames,
            Self::En => &EnglishWeekdayNames,
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::Fr
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fr => "fr",
            Self::En => "en",
        };
        f.write_str(s)
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fr" => Ok(Self::Fr),
            "en" => Ok(Self::En),
            other => Err(LocaleParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Locale`] string.
#[derive(Debug, Clone)]
pub struct LocaleParseError(pub String);

impl fmt::Display for LocaleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid locale {:?} (expected fr or en)", self.0)
    }
}

impl std::error::Error for LocaleParseError {}

// ---------------------------------------------------------------------------

/// Uppercase the first letter of a display name, leaving the rest as-is.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
