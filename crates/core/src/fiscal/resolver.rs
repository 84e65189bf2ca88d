//! Resolution of `(fiscal year, quarter selector)` pairs into date ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::FiscalError;
use super::types::{DateRange, FiscalYear, Quarter};

/// Which part of a fiscal year a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum QuarterSelector {
    /// The whole fiscal year.
    #[default]
    All,
    /// A single quarter.
    Quarter(Quarter),
}

impl QuarterSelector {
    /// Reads a request parameter: exactly `"1"`..`"4"` pick a quarter, anything
    /// else (including padded values) means the whole year.
    ///
    /// Report links rely on unknown values falling back to `All` rather than failing.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        match raw {
            "1" => Self::Quarter(Quarter::Q1),
            "2" => Self::Quarter(Quarter::Q2),
            "3" => Self::Quarter(Quarter::Q3),
            "4" => Self::Quarter(Quarter::Q4),
            "all" => Self::All,
            other => {
                tracing::debug!(selector = other, "unrecognized quarter selector, using full year");
                Self::All
            }
        }
    }

    /// Request form of the selector: `"1"`..`"4"` or `"all"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Quarter(Quarter::Q1) => "1",
            Self::Quarter(Quarter::Q2) => "2",
            Self::Quarter(Quarter::Q3) => "3",
            Self::Quarter(Quarter::Q4) => "4",
        }
    }
}

impl fmt::Display for QuarterSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<QuarterSelector> for String {
    fn from(value: QuarterSelector) -> Self {
        value.as_str().to_string()
    }
}

impl From<String> for QuarterSelector {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

/// Turns fiscal-year and quarter selections into inclusive date ranges.
pub struct RangeResolver;

impl RangeResolver {
    /// Resolves a raw fiscal-year label and quarter selector.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::Validation` if the label is malformed. Falling
    /// back to the current fiscal year is left to the caller.
    pub fn resolve(label: &str, quarter_selector: &str) -> Result<DateRange, FiscalError> {
        let fiscal_year: FiscalYear = label.parse()?;
        Ok(Self::resolve_selector(
            fiscal_year,
            QuarterSelector::parse_lenient(quarter_selector),
        ))
    }

    /// Resolves an already-validated fiscal year and selector.
    #[must_use]
    pub fn resolve_selector(fiscal_year: FiscalYear, selector: QuarterSelector) -> DateRange {
        match selector {
            QuarterSelector::All => fiscal_year.range(),
            QuarterSelector::Quarter(quarter) => fiscal_year.quarter(quarter),
        }
    }
}
