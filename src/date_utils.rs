use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// Trait for filter params that carry a month selection.
pub trait MonthFilterable {
    fn month(&self) -> Option<&String>;

    /// Resolve the month parameter against the months that actually have data.
    /// A missing or unparseable value selects the newest month, or `All` when
    /// there is no data at all.
    fn resolve_month(&self, available: &[YearMonth]) -> MonthSelection {
        match self.month().map(|s| s.parse::<MonthSelection>()) {
            Some(Ok(selection)) => selection,
            _ => available
                .iter()
                .max()
                .copied()
                .map(MonthSelection::Month)
                .unwrap_or(MonthSelection::All),
        }
    }
}

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    fn first_day(&self) -> NaiveDate {
        // Construction guarantees the first of the month exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// `YYYY-MM`, the key used in query strings and file names.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// e.g. "February 2025".
    pub fn long_label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// e.g. "Feb 25".
    pub fn short_label(&self) -> String {
        self.first_day().format("%b %y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.trim().split_once('-').ok_or(())?;
        if year.len() != 4 || month.len() != 2 {
            return Err(());
        }
        let year: i32 = year.parse().map_err(|_| ())?;
        let month: u32 = month.parse().map_err(|_| ())?;
        Self::new(year, month).ok_or(())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Month filter: either every month or one specific month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthSelection {
    #[default]
    All,
    Month(YearMonth),
}

impl MonthSelection {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Month(ym) => ym.contains(date),
        }
    }

    /// Query-string value: `All` or `YYYY-MM`.
    pub fn key(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Month(ym) => ym.key(),
        }
    }

    /// e.g. "February 2025" or "All Time".
    pub fn label(&self) -> String {
        match self {
            Self::All => "All Time".to_string(),
            Self::Month(ym) => ym.long_label(),
        }
    }

    /// Suffix used in export file names: `YYYY-MM` or `all`.
    pub fn file_suffix(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Month(ym) => ym.key(),
        }
    }
}

impl FromStr for MonthSelection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse::<YearMonth>().map(Self::Month)
        }
    }
}

/// Monday of the week containing `date`. Weeks run Monday to Sunday, so a
/// Sunday maps to the Monday six days earlier.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - chrono::Duration::days(days_from_monday as i64)
}

pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + chrono::Duration::days(6)
}
