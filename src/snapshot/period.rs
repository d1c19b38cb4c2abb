//! Monthly reporting periods.

use chrono::{Datelike, Months, NaiveDate, Utc};
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A calendar month, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    first_day: NaiveDate,
}

impl Period {
    /// Create a period, returning `None` for an invalid year/month pair.
    #[must_use]
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first_day| Self { first_day })
    }

    /// The period containing today's date (UTC).
    #[must_use]
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            first_day: today.with_day(1).unwrap_or(today),
        }
    }

    /// The calendar month before this one.
    #[must_use]
    pub fn previous(self) -> Self {
        Self {
            first_day: self.first_day.checked_sub_months(Months::new(1)).unwrap_or(self.first_day),
        }
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.first_day.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.first_day.month()
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((year, month)) = trimmed.split_once('-') else {
            anyhow::bail!("invalid period '{s}': expected YYYY-MM");
        };

        let year: i32 = year.parse().map_err(|_err| anyhow::anyhow!("invalid year in period '{s}'"))?;
        let month: u32 = month.parse().map_err(|_err| anyhow::anyhow!("invalid month in period '{s}'"))?;
        Self::new(year, month).ok_or_else(|| anyhow::anyhow!("invalid period '{s}': month must be between 1 and 12"))
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(|e: anyhow::Error| de::Error::custom(e))
    }
}
