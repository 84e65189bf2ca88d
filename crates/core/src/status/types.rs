//! Lifecycle status and the completion predicate.

use std::fmt;
use std::str::FromStr;

use attachee_shared::types::DepartmentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::attachee::Attachee;

/// Placement lifecycle status.
///
/// The only transition is `Active` to `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AttacheeStatus {
    /// Placement still running.
    Active,
    /// Placement ended on or before the last reconciliation date.
    Completed,
}

impl AttacheeStatus {
    /// Persisted form, `"Active"` or `"Completed"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Returns true for `Active`.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for AttacheeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status string other than `"Active"` or `"Completed"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown attachee status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AttacheeStatus {
    type Err = UnknownStatus;

    /// Case-sensitive: stored values are exactly `"Active"` or `"Completed"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Completed" => Ok(Self::Completed),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Selects the records a reconciliation pass completes.
///
/// A record matches when it is still `Active` and its end date is on or
/// before `as_of`. Completed records never match, so applying the update
/// twice changes nothing the second time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionPredicate {
    /// Reconciliation date.
    pub as_of: NaiveDate,
    /// Restrict to one department.
    pub department: Option<DepartmentId>,
}

impl CompletionPredicate {
    /// Predicate over every department.
    #[must_use]
    pub const fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            department: None,
        }
    }

    /// Predicate limited to `department`.
    #[must_use]
    pub const fn for_department(as_of: NaiveDate, department: DepartmentId) -> Self {
        Self {
            as_of,
            department: Some(department),
        }
    }

    /// Evaluates the predicate against raw record fields.
    #[must_use]
    pub fn matches(
        &self,
        status: AttacheeStatus,
        end_date: NaiveDate,
        department_id: DepartmentId,
    ) -> bool {
        status.is_active()
            && end_date <= self.as_of
            && self.department.is_none_or(|d| d == department_id)
    }

    /// Evaluates the predicate against a record.
    #[must_use]
    pub fn matches_record(&self, record: &Attachee) -> bool {
        self.matches(record.status, record.end_date, record.department_id)
    }
}
