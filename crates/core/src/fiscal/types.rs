//! Fiscal year, quarter and date range types.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::FiscalError;

/// Calendar month (July) in which every fiscal year starts.
pub const FISCAL_YEAR_START_MONTH: u32 = 7;

/// Largest start year whose label still fits `YYYY-YYYY`.
pub const MAX_START_YEAR: i32 = 9998;

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day in the range.
    pub start: NaiveDate,
    /// Last day in the range.
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from its two inclusive bounds.
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true if `date` falls within the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns true if `[start, end]` shares at least one day with this range.
    ///
    /// A span crossing either boundary counts; containment is not required.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }

    /// Number of days covered, counting both ends.
    #[must_use]
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// One of the four three-month partitions of a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    /// July to September.
    Q1,
    /// October to December.
    Q2,
    /// January to March of the second calendar year.
    Q3,
    /// April to June of the second calendar year.
    Q4,
}

impl Quarter {
    /// All quarters in fiscal order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Quarter number, 1 through 4.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Q1 => 1,
            Self::Q2 => 2,
            Self::Q3 => 3,
            Self::Q4 => 4,
        }
    }

    /// Quarter for a number 1 through 4.
    #[must_use]
    pub const fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Q1),
            2 => Some(Self::Q2),
            3 => Some(Self::Q3),
            4 => Some(Self::Q4),
            _ => None,
        }
    }

    /// Quarter containing the given calendar month (1-12).
    #[must_use]
    pub const fn for_month(month: u32) -> Self {
        match month {
            7..=9 => Self::Q1,
            10..=12 => Self::Q2,
            1..=3 => Self::Q3,
            _ => Self::Q4,
        }
    }

    /// Short label such as `"Q1"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    /// Display name such as `"First Quarter"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Q1 => "First Quarter",
            Self::Q2 => "Second Quarter",
            Self::Q3 => "Third Quarter",
            Self::Q4 => "Fourth Quarter",
        }
    }

    const fn index(self) -> usize {
        self.number() as usize - 1
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quarter {
    type Err = FiscalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FiscalError::validation(format!("unknown quarter {s}")))
    }
}

/// A July-June fiscal year, labelled `"YYYY-YYYY"`.
///
/// Only start years in `0..=MAX_START_YEAR` can be constructed, so the label
/// is always two four-digit years one apart. Quarter bounds are computed once
/// at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FiscalYear {
    start_year: i32,
    quarters: [DateRange; 4],
}

impl FiscalYear {
    /// Fiscal year beginning on July 1 of `start_year`.
    pub fn starting(start_year: i32) -> Result<Self, FiscalError> {
        if !(0..=MAX_START_YEAR).contains(&start_year) {
            return Err(FiscalError::validation(format!(
                "{start_year}-{}",
                i64::from(start_year) + 1
            )));
        }
        let quarters = quarter_bounds(start_year)
            .ok_or_else(|| FiscalError::validation(format!("{start_year}-{}", start_year + 1)))?;
        Ok(Self {
            start_year,
            quarters,
        })
    }

    /// Fiscal year containing `date`: July onwards belongs to the year starting then.
    pub fn for_date(date: NaiveDate) -> Result<Self, FiscalError> {
        let start_year = if date.month() >= FISCAL_YEAR_START_MONTH {
            date.year()
        } else {
            date.year() - 1
        };
        Self::starting(start_year).map_err(|_| FiscalError::invalid_date(date.to_string()))
    }

    /// Calendar year of July 1.
    #[must_use]
    pub const fn start_year(self) -> i32 {
        self.start_year
    }

    /// Calendar year of June 30.
    #[must_use]
    pub const fn end_year(self) -> i32 {
        self.start_year + 1
    }

    /// Full label, e.g. `"2023-2024"`.
    #[must_use]
    pub fn label(self) -> String {
        self.to_string()
    }

    /// Two-digit label, e.g. `"23-24"`.
    #[must_use]
    pub fn short_label(self) -> String {
        format!("{:02}-{:02}", self.start_year % 100, self.end_year() % 100)
    }

    /// July 1 of the first year.
    #[must_use]
    pub const fn start_date(self) -> NaiveDate {
        self.quarters[0].start
    }

    /// June 30 of the second year.
    #[must_use]
    pub const fn end_date(self) -> NaiveDate {
        self.quarters[3].end
    }

    /// The whole year as one range.
    #[must_use]
    pub const fn range(self) -> DateRange {
        DateRange::new(self.start_date(), self.end_date())
    }

    /// Range of one quarter.
    #[must_use]
    pub const fn quarter(self, quarter: Quarter) -> DateRange {
        self.quarters[quarter.index()]
    }

    /// All four quarters in order with their ranges.
    #[must_use]
    pub fn quarters(self) -> [(Quarter, DateRange); 4] {
        Quarter::ALL.map(|q| (q, self.quarter(q)))
    }

    /// Returns true if `date` lies within this fiscal year.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        self.range().contains(date)
    }

    /// The following fiscal year, if it still has a four-digit label.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::starting(self.start_year + 1).ok()
    }

    /// The preceding fiscal year, if any.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        Self::starting(self.start_year - 1).ok()
    }
}

fn span(start: (i32, u32, u32), end: (i32, u32, u32)) -> Option<DateRange> {
    Some(DateRange::new(
        NaiveDate::from_ymd_opt(start.0, start.1, start.2)?,
        NaiveDate::from_ymd_opt(end.0, end.1, end.2)?,
    ))
}

fn quarter_bounds(start_year: i32) -> Option<[DateRange; 4]> {
    let end_year = start_year + 1;
    Some([
        span((start_year, 7, 1), (start_year, 9, 30))?,
        span((start_year, 10, 1), (start_year, 12, 31))?,
        span((end_year, 1, 1), (end_year, 3, 31))?,
        span((end_year, 4, 1), (end_year, 6, 30))?,
    ])
}

/// Start year encoded in a well-formed label.
pub(crate) fn parse_label(label: &str) -> Option<i32> {
    let bytes = label.as_bytes();
    if bytes.len() != 9 || bytes[4] != b'-' {
        return None;
    }
    let (first, second) = (&label[..4], &label[5..]);
    if !first.bytes().chain(second.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let first: i32 = first.parse().ok()?;
    let second: i32 = second.parse().ok()?;
    (second == first + 1).then_some(first)
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:04}", self.start_year, self.end_year())
    }
}

impl FromStr for FiscalYear {
    type Err = FiscalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let start_year = parse_label(s).ok_or_else(|| FiscalError::validation(s))?;
        Self::starting(start_year)
    }
}

impl TryFrom<String> for FiscalYear {
    type Error = FiscalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FiscalYear> for String {
    fn from(value: FiscalYear) -> Self {
        value.label()
    }
}
