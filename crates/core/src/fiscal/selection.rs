//! Dashboard period selection with fallback to the current fiscal year.

use chrono::NaiveDate;
use serde::Serialize;

use super::calendar::FiscalCalendar;
use super::error::FiscalError;
use super::resolver::{QuarterSelector, RangeResolver};
use super::types::{DateRange, FiscalYear};

/// The fiscal year and quarter a page is showing, with its resolved range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSelection {
    /// Fiscal year actually used.
    pub fiscal_year: FiscalYear,
    /// Quarter selection actually used.
    pub quarter: QuarterSelector,
    /// Inclusive range covered.
    pub range: DateRange,
    /// True when the requested fiscal year was invalid and the current one was substituted.
    pub fell_back: bool,
}

impl PeriodSelection {
    /// Builds a selection from raw `financial_year` and `quarter` request parameters.
    ///
    /// A missing year means the current one. An invalid year is replaced by
    /// the current one and the range resolved again.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidDate` only if `today` itself has no
    /// representable fiscal year.
    pub fn from_request(
        financial_year: Option<&str>,
        quarter: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, FiscalError> {
        let current = FiscalCalendar::current_fiscal_year(today)?;
        let quarter_raw = quarter.unwrap_or("all");
        let selector = QuarterSelector::parse_lenient(quarter_raw);

        let Some(label) = financial_year else {
            return Ok(Self::for_fiscal_year(current, selector));
        };

        match RangeResolver::resolve(label, quarter_raw) {
            Ok(range) => Ok(Self {
                fiscal_year: label.parse()?,
                quarter: selector,
                range,
                fell_back: false,
            }),
            Err(FiscalError::Validation(_)) => {
                tracing::warn!(
                    requested = label,
                    fallback = %current,
                    "invalid fiscal year requested, using current fiscal year"
                );
                let range = RangeResolver::resolve(&current.label(), quarter_raw)?;
                Ok(Self {
                    fiscal_year: current,
                    quarter: selector,
                    range,
                    fell_back: true,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Selection for a known fiscal year.
    #[must_use]
    pub fn for_fiscal_year(fiscal_year: FiscalYear, quarter: QuarterSelector) -> Self {
        Self {
            fiscal_year,
            quarter,
            range: RangeResolver::resolve_selector(fiscal_year, quarter),
            fell_back: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fiscal::Quarter;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_to_current_year_and_all_quarters() {
        let selection = PeriodSelection::from_request(None, None, date(2026, 10, 18)).unwrap();
        assert_eq!(selection.fiscal_year.label(), "2026-2027");
        assert_eq!(selection.quarter, QuarterSelector::All);
        assert_eq!(selection.range, DateRange::new(date(2026, 7, 1), date(2027, 6, 30)));
        assert!(!selection.fell_back);
    }

    #[test]
    fn test_requested_year_and_quarter() {
        let selection =
            PeriodSelection::from_request(Some("2023-2024"), Some("2"), date(2026, 10, 18))
                .unwrap();
        assert_eq!(selection.fiscal_year.label(), "2023-2024");
        assert_eq!(selection.quarter, QuarterSelector::Quarter(Quarter::Q2));
        assert_eq!(selection.range, DateRange::new(date(2023, 10, 1), date(2023, 12, 31)));
    }

    #[test]
    fn test_invalid_year_falls_back_to_current() {
        let selection =
            PeriodSelection::from_request(Some("2023-2025"), Some("3"), date(2026, 10, 18))
                .unwrap();
        assert!(selection.fell_back);
        assert_eq!(selection.fiscal_year.label(), "2026-2027");
        assert_eq!(selection.range, DateRange::new(date(2027, 1, 1), date(2027, 3, 31)));
    }

    #[test]
    fn test_unknown_quarter_keeps_year() {
        let selection =
            PeriodSelection::from_request(Some("2023-2024"), Some("9"), date(2026, 10, 18))
                .unwrap();
        assert!(!selection.fell_back);
        assert_eq!(selection.quarter, QuarterSelector::All);
        assert_eq!(selection.range, DateRange::new(date(2023, 7, 1), date(2024, 6, 30)));
    }
}
