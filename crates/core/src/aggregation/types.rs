//! Aggregation result types.

use std::collections::BTreeMap;

use attachee_shared::config::CapacityConfig;
use attachee_shared::types::DepartmentId;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::attachee::Attachee;
use crate::fiscal::{DateRange, FiscalYear, Quarter, QuarterSelector};
use crate::status::AttacheeStatus;

/// Utilization ratio at which a department is flagged (0.8).
pub const DEFAULT_WARNING_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 1);

/// Capacity assumed for departments without one on record.
pub const DEFAULT_MAX_CAPACITY: u32 = 10;

/// Dimension records are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupBy {
    /// Host department.
    Department,
    /// Quarter of the start date.
    Quarter,
    /// Booked fiscal year, or the one containing the start date.
    FiscalYear,
}

/// Key of one group in a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GroupKey {
    /// Department group.
    Department(DepartmentId),
    /// Quarter group.
    Quarter(Quarter),
    /// Fiscal-year group.
    FiscalYear(FiscalYear),
    /// Records with no booked fiscal year and a start date outside every fiscal year.
    Unassigned,
}

/// Record counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// All records.
    pub total: usize,
    /// Records still active.
    pub active: usize,
    /// Records completed.
    pub completed: usize,
}

impl StatusCounts {
    /// Adds one record with `status`.
    pub fn record(&mut self, status: AttacheeStatus) {
        self.total += 1;
        match status {
            AttacheeStatus::Active => self.active += 1,
            AttacheeStatus::Completed => self.completed += 1,
        }
    }

    /// Counts for a set of records.
    #[must_use]
    pub fn tally<'a>(records: impl IntoIterator<Item = &'a Attachee>) -> Self {
        let mut counts = Self::default();
        for record in records {
            counts.record(record.status);
        }
        counts
    }
}

/// A department at or above the warning threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityWarning {
    /// Department flagged.
    pub department_id: DepartmentId,
    /// Active attachees in the period.
    pub active: usize,
    /// Department capacity.
    pub max_capacity: u32,
    /// `active / max_capacity * 100`, two decimal places.
    pub utilization_percent: Decimal,
}

/// One heatmap row: a department's overlap counts per quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentQuarterRow {
    /// Department.
    pub department_id: DepartmentId,
    /// Department name.
    pub name: String,
    /// Records overlapping each quarter.
    pub quarters: BTreeMap<Quarter, usize>,
    /// Sum of the quarter counts.
    pub total: usize,
}

/// One department's load for the selected period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentLoad {
    /// Department.
    pub department_id: DepartmentId,
    /// Department name.
    pub name: String,
    /// Capacity, with the default applied.
    pub max_capacity: u32,
    /// Counts for the period.
    pub counts: StatusCounts,
    /// Active share of capacity in percent; zero when capacity is zero.
    pub utilization_percent: Decimal,
}

/// Thresholds used when building a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Utilization ratio that raises a capacity warning.
    pub warning_threshold: Decimal,
    /// Capacity for departments without one on record.
    pub default_max_capacity: u32,
    /// Number of recent attachees listed.
    pub recent_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            default_max_capacity: DEFAULT_MAX_CAPACITY,
            recent_limit: 5,
        }
    }
}

impl From<&CapacityConfig> for DashboardSettings {
    fn from(config: &CapacityConfig) -> Self {
        Self {
            warning_threshold: config.warning_threshold,
            default_max_capacity: config.default_max_capacity,
            ..Self::default()
        }
    }
}

/// Everything the dashboard shows for one period selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// Fiscal year shown.
    pub fiscal_year: FiscalYear,
    /// Quarter selection shown.
    pub quarter: QuarterSelector,
    /// Range the period figures cover.
    pub range: DateRange,
    /// Counts over every department for the period.
    pub totals: StatusCounts,
    /// Per-department load, ordered by name.
    pub departments: Vec<DepartmentLoad>,
    /// Departments at or above the warning threshold.
    pub capacity_warnings: Vec<CapacityWarning>,
    /// Whole-year overlap counts per quarter.
    pub quarterly: BTreeMap<Quarter, usize>,
    /// Whole-year overlap counts per department and quarter.
    pub heatmap: Vec<DepartmentQuarterRow>,
    /// Most recently created records in the period.
    pub recent: Vec<Attachee>,
}
