//! Attachee and department types.

use attachee_shared::types::{AttacheeId, DepartmentId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fiscal::{DateRange, FiscalYear};
use crate::status::{AttacheeStatus, StatusService};

/// A placement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachee {
    /// Attachee ID.
    pub id: AttacheeId,
    /// Host department.
    pub department_id: DepartmentId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender as entered on the form.
    pub gender: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// School or university.
    pub school: Option<String>,
    /// Course of study.
    pub course: Option<String>,
    /// Desk or office the attachee sits at.
    pub location_slot: Option<String>,
    /// Supervisor notes.
    pub progress_notes: Option<String>,
    /// First day of the placement.
    pub start_date: NaiveDate,
    /// Last day of the placement.
    pub end_date: NaiveDate,
    /// Lifecycle status.
    pub status: AttacheeStatus,
    /// Fiscal year the placement is booked against.
    pub fiscal_year: Option<FiscalYear>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl Attachee {
    /// First and last name joined.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the placement shares at least one day with `range`.
    #[must_use]
    pub fn overlaps(&self, range: &DateRange) -> bool {
        range.overlaps(self.start_date, self.end_date)
    }

    /// Percentage of the placement elapsed at `as_of`.
    #[must_use]
    pub fn progress_percent(&self, as_of: NaiveDate) -> Decimal {
        StatusService::progress_percent(self.start_date, self.end_date, as_of)
    }
}

/// Input for creating an attachee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateAttacheeInput {
    /// Host department.
    pub department_id: DepartmentId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Gender.
    pub gender: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// School or university.
    pub school: Option<String>,
    /// Course of study.
    pub course: Option<String>,
    /// Desk or office.
    pub location_slot: Option<String>,
    /// Supervisor notes.
    pub progress_notes: Option<String>,
    /// First day of the placement.
    pub start_date: NaiveDate,
    /// Last day of the placement.
    pub end_date: NaiveDate,
    /// Fiscal-year label from the form; blank means derive it from `start_date`.
    pub fiscal_year: Option<String>,
}

/// A host department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department ID.
    pub id: DepartmentId,
    /// Department name.
    pub name: String,
    /// How many active attachees the department can host, if recorded.
    pub max_capacity: Option<u32>,
}

impl Department {
    /// Recorded capacity, or `default` when none is on record.
    #[must_use]
    pub fn effective_capacity(&self, default: u32) -> u32 {
        self.max_capacity.unwrap_or(default)
    }
}
