//! Date to fiscal-year and quarter conversions.

use std::collections::BTreeMap;

use attachee_shared::config::CalendarConfig;
use chrono::{Datelike, NaiveDate};

use super::error::FiscalError;
use super::types::{parse_label, DateRange, FiscalYear, Quarter, MAX_START_YEAR};

/// Date format accepted from forms and query strings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Pure conversions for the July-June fiscal calendar.
pub struct FiscalCalendar;

impl FiscalCalendar {
    /// Parses a `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidDate` if the text is not a real calendar date.
    pub fn parse_date(input: &str) -> Result<NaiveDate, FiscalError> {
        NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
            .map_err(|_| FiscalError::invalid_date(input))
    }

    /// Fiscal year containing `date`.
    ///
    /// July through December belong to the year starting that July; January
    /// through June belong to the year that started the previous July.
    pub fn year_for_date(date: NaiveDate) -> Result<FiscalYear, FiscalError> {
        FiscalYear::for_date(date)
    }

    /// Fiscal year for a `YYYY-MM-DD` string.
    pub fn year_for_date_str(input: &str) -> Result<FiscalYear, FiscalError> {
        Self::year_for_date(Self::parse_date(input)?)
    }

    /// Quarter containing `date` together with that quarter's range.
    pub fn quarter_for_date(date: NaiveDate) -> Result<(Quarter, DateRange), FiscalError> {
        let fiscal_year = Self::year_for_date(date)?;
        let quarter = Quarter::for_month(date.month());
        Ok((quarter, fiscal_year.quarter(quarter)))
    }

    /// Quarter for a `YYYY-MM-DD` string.
    pub fn quarter_for_date_str(input: &str) -> Result<(Quarter, DateRange), FiscalError> {
        Self::quarter_for_date(Self::parse_date(input)?)
    }

    /// The four quarters of a fiscal year, Q1 first.
    #[must_use]
    pub fn quarters_of(fiscal_year: FiscalYear) -> BTreeMap<Quarter, DateRange> {
        fiscal_year.quarters().into_iter().collect()
    }

    /// True iff `label` is `NNNN-NNNN` with the second year one after the first.
    #[must_use]
    pub fn is_valid_fiscal_year(label: &str) -> bool {
        parse_label(label).is_some()
    }

    /// `"2023-2024"` becomes `"23-24"`; invalid labels give an empty string.
    #[must_use]
    pub fn short_label(label: &str) -> String {
        label
            .parse::<FiscalYear>()
            .map(FiscalYear::short_label)
            .unwrap_or_default()
    }

    /// Fiscal year in progress on `today`.
    pub fn current_fiscal_year(today: NaiveDate) -> Result<FiscalYear, FiscalError> {
        Self::year_for_date(today)
    }

    /// Quarter in progress on `today`.
    pub fn current_quarter(today: NaiveDate) -> Result<(Quarter, DateRange), FiscalError> {
        Self::quarter_for_date(today)
    }

    /// Fiscal years from `radius` before to `radius` after the current one, ascending.
    ///
    /// Years that would fall outside four-digit labels are left out.
    pub fn year_window(today: NaiveDate, radius: u32) -> Result<Vec<FiscalYear>, FiscalError> {
        let current = Self::current_fiscal_year(today)?.start_year();
        let radius = i32::try_from(radius).unwrap_or(MAX_START_YEAR).min(MAX_START_YEAR);

        Ok(((current - radius)..=(current + radius))
            .filter_map(|year| FiscalYear::starting(year).ok())
            .collect())
    }

    /// Fiscal years offered by year selectors, using the configured radius.
    pub fn selectable_years(
        today: NaiveDate,
        config: &CalendarConfig,
    ) -> Result<Vec<FiscalYear>, FiscalError> {
        Self::year_window(today, config.year_window)
    }
}
