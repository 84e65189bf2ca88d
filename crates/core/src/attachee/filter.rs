//! Filter for the completed-placements report.

use attachee_shared::types::DepartmentId;
use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::types::Attachee;
use crate::fiscal::{DateRange, FiscalYear, Quarter};
use crate::status::AttacheeStatus;

/// Narrows completed placements by when they ended and where they sat.
///
/// Every criterion is optional; blank strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedFilter {
    /// Placement ended within this fiscal year.
    pub fiscal_year: Option<FiscalYear>,
    /// Placement ended in a month of this quarter.
    pub quarter: Option<Quarter>,
    /// Host department.
    pub department: Option<DepartmentId>,
    /// Exact school name.
    pub school: Option<String>,
    /// Substring of the location slot.
    pub location: Option<String>,
}

impl CompletedFilter {
    /// School criterion, if set and non-blank.
    #[must_use]
    pub fn school(&self) -> Option<&str> {
        self.school.as_deref().filter(|s| !s.is_empty())
    }

    /// Location criterion, if set and non-blank.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref().filter(|s| !s.is_empty())
    }

    /// Range the end date must fall in: the quarter of the fiscal year when
    /// both are set, else the whole fiscal year.
    #[must_use]
    pub fn end_date_range(&self) -> Option<DateRange> {
        let fiscal_year = self.fiscal_year?;
        Some(match self.quarter {
            Some(quarter) => fiscal_year.quarter(quarter),
            None => fiscal_year.range(),
        })
    }

    /// Returns true if `record` is completed and meets every criterion.
    #[must_use]
    pub fn matches(&self, record: &Attachee) -> bool {
        record.status == AttacheeStatus::Completed
            && self
                .end_date_range()
                .is_none_or(|range| range.contains(record.end_date))
            && self
                .quarter
                .is_none_or(|q| Quarter::for_month(record.end_date.month()) == q)
            && self.department.is_none_or(|d| d == record.department_id)
            && self
                .school()
                .is_none_or(|s| record.school.as_deref() == Some(s))
            && self.location().is_none_or(|l| {
                record
                    .location_slot
                    .as_deref()
                    .is_some_and(|slot| slot.contains(l))
            })
    }
}
