//! Calendar month and record type keys for monthly facts.
//!
//! Every fact row is keyed by the first day of its calendar month and
//! by whether it is a budget figure or an actual figure.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Short month names, January first.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Error returned when a month string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid month '{0}': expected YYYY-MM or YYYY-MM-DD")]
pub struct MonthParseError(pub String);

/// A calendar month, stored as its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month(NaiveDate);

impl Month {
    /// Creates a month from a year and a 1-based month number.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// Truncates any date to the first day of its month.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        // Day 1 exists in every month, so with_day(1) cannot fail here.
        Self(date.with_day(1).unwrap_or(date))
    }

    /// Returns the first day of the month.
    #[must_use]
    pub const fn first_day(self) -> NaiveDate {
        self.0
    }

    /// Returns the year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the 1-based month number.
    #[must_use]
    pub fn number(self) -> u32 {
        self.0.month()
    }

    /// Returns the short month name, e.g. `Mar`.
    #[must_use]
    pub fn short_name(self) -> &'static str {
        MONTHS[self.0.month0() as usize]
    }

    /// Returns `Mar 2025` style labels used on invoices.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} {}", self.short_name(), self.year())
    }
}

impl From<NaiveDate> for Month {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl From<Month> for NaiveDate {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.number())
    }
}

impl std::str::FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Self::from_date(date));
        }
        let (year, month) = trimmed
            .split_once('-')
            .ok_or_else(|| MonthParseError(s.to_string()))?;
        let year = year.parse().map_err(|_| MonthParseError(s.to_string()))?;
        let month = month.parse().map_err(|_| MonthParseError(s.to_string()))?;
        Self::new(year, month).ok_or_else(|| MonthParseError(s.to_string()))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.format("%Y-%m-%d").to_string())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether a fact row holds a planned or a realised figure.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum RecordType {
    /// Planned figure.
    #[default]
    Budget,
    /// Realised figure.
    Actual,
}

impl RecordType {
    /// Returns the stored string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "Budget",
            Self::Actual => "Actual",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(Self::Budget),
            "actual" => Ok(Self::Actual),
            _ => Err(format!("Unknown record type: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "period_tests.rs"]
mod tests;
