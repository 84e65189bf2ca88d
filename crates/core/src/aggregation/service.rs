//! Grouped counts, capacity warnings and quarterly breakdowns.

use std::collections::BTreeMap;

use attachee_shared::types::DepartmentId;
use chrono::Datelike;
use rust_decimal::Decimal;

use super::types::{
    CapacityWarning, DashboardSettings, DashboardSummary, DepartmentLoad, DepartmentQuarterRow,
    GroupBy, GroupKey, StatusCounts, DEFAULT_WARNING_THRESHOLD,
};
use crate::attachee::{Attachee, Department};
use crate::fiscal::{
    FiscalCalendar, FiscalYear, PeriodSelection, Quarter, QuarterSelector, RangeResolver,
};

/// Read-only reporting over attachee records.
pub struct AggregationService;

impl AggregationService {
    /// Counts records by status within each group.
    #[must_use]
    pub fn summarize(
        records: &[Attachee],
        group_by: GroupBy,
    ) -> BTreeMap<GroupKey, StatusCounts> {
        let mut groups: BTreeMap<GroupKey, StatusCounts> = BTreeMap::new();
        for record in records {
            groups
                .entry(Self::group_key(record, group_by))
                .or_default()
                .record(record.status);
        }
        groups
    }

    fn group_key(record: &Attachee, group_by: GroupBy) -> GroupKey {
        match group_by {
            GroupBy::Department => GroupKey::Department(record.department_id),
            GroupBy::Quarter => GroupKey::Quarter(Quarter::for_month(record.start_date.month())),
            GroupBy::FiscalYear => record
                .fiscal_year
                .or_else(|| FiscalCalendar::year_for_date(record.start_date).ok())
                .map_or(GroupKey::Unassigned, GroupKey::FiscalYear),
        }
    }

    /// Departments whose active count reaches 80% of capacity.
    ///
    /// Departments with zero capacity are skipped.
    #[must_use]
    pub fn capacity_warnings(
        summaries: &BTreeMap<GroupKey, StatusCounts>,
        max_capacity_of: impl Fn(DepartmentId) -> u32,
    ) -> Vec<CapacityWarning> {
        Self::capacity_warnings_with_threshold(
            summaries,
            max_capacity_of,
            DEFAULT_WARNING_THRESHOLD,
        )
    }

    /// Departments whose `active / max_capacity` is at least `threshold`.
    ///
    /// Only department keys are considered. Departments with zero capacity
    /// have no defined utilization and are skipped.
    #[must_use]
    pub fn capacity_warnings_with_threshold(
        summaries: &BTreeMap<GroupKey, StatusCounts>,
        max_capacity_of: impl Fn(DepartmentId) -> u32,
        threshold: Decimal,
    ) -> Vec<CapacityWarning> {
        summaries
            .iter()
            .filter_map(|(key, counts)| match key {
                GroupKey::Department(id) => Some((*id, counts)),
                _ => None,
            })
            .filter_map(|(department_id, counts)| {
                let max_capacity = max_capacity_of(department_id);
                let ratio = Self::utilization(counts.active, max_capacity)?;
                (ratio >= threshold).then(|| CapacityWarning {
                    department_id,
                    active: counts.active,
                    max_capacity,
                    utilization_percent: Self::percent(ratio),
                })
            })
            .collect()
    }

    /// `active / max_capacity`, or `None` for zero capacity.
    fn utilization(active: usize, max_capacity: u32) -> Option<Decimal> {
        if max_capacity == 0 {
            return None;
        }
        Some(Decimal::from(active) / Decimal::from(max_capacity))
    }

    fn percent(ratio: Decimal) -> Decimal {
        (ratio * Decimal::ONE_HUNDRED).round_dp(2)
    }

    /// Records overlapping each quarter of `fiscal_year`.
    ///
    /// A placement spanning a quarter boundary counts in both quarters.
    #[must_use]
    pub fn quarterly_breakdown(
        records: &[Attachee],
        fiscal_year: FiscalYear,
    ) -> BTreeMap<Quarter, usize> {
        Quarter::ALL
            .into_iter()
            .map(|quarter| {
                let range =
                    RangeResolver::resolve_selector(fiscal_year, QuarterSelector::Quarter(quarter));
                (quarter, records.iter().filter(|r| r.overlaps(&range)).count())
            })
            .collect()
    }

    /// Quarterly breakdown for every department, ordered by name.
    ///
    /// Departments with no records still get a row of zeros.
    #[must_use]
    pub fn department_quarter_matrix(
        records: &[Attachee],
        departments: &[Department],
        fiscal_year: FiscalYear,
    ) -> Vec<DepartmentQuarterRow> {
        let mut rows: Vec<DepartmentQuarterRow> = departments
            .iter()
            .map(|department| {
                let own: Vec<Attachee> = records
                    .iter()
                    .filter(|r| r.department_id == department.id)
                    .cloned()
                    .collect();
                let quarters = Self::quarterly_breakdown(&own, fiscal_year);
                DepartmentQuarterRow {
                    department_id: department.id,
                    name: department.name.clone(),
                    total: quarters.values().sum(),
                    quarters,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    /// Builds the dashboard for `selection`.
    ///
    /// `records` should cover the whole fiscal year: period figures are
    /// limited to `selection.range`, while the quarterly breakdown and the
    /// heatmap always span the full year.
    #[must_use]
    pub fn build_dashboard(
        records: &[Attachee],
        departments: &[Department],
        selection: &PeriodSelection,
        settings: &DashboardSettings,
    ) -> DashboardSummary {
        let in_period: Vec<&Attachee> = records
            .iter()
            .filter(|r| r.overlaps(&selection.range))
            .collect();

        let mut sorted: Vec<&Department> = departments.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));

        let loads: Vec<DepartmentLoad> = sorted
            .into_iter()
            .map(|department| {
                let max_capacity = department.effective_capacity(settings.default_max_capacity);
                let counts = StatusCounts::tally(
                    in_period
                        .iter()
                        .copied()
                        .filter(|r| r.department_id == department.id),
                );
                DepartmentLoad {
                    department_id: department.id,
                    name: department.name.clone(),
                    max_capacity,
                    counts,
                    utilization_percent: Self::utilization(counts.active, max_capacity)
                        .map_or(Decimal::ZERO, Self::percent),
                }
            })
            .collect();

        let summaries: BTreeMap<GroupKey, StatusCounts> = loads
            .iter()
            .map(|load| (GroupKey::Department(load.department_id), load.counts))
            .collect();
        let capacities: BTreeMap<DepartmentId, u32> = loads
            .iter()
            .map(|load| (load.department_id, load.max_capacity))
            .collect();
        let capacity_warnings = Self::capacity_warnings_with_threshold(
            &summaries,
            |id| capacities.get(&id).copied().unwrap_or(settings.default_max_capacity),
            settings.warning_threshold,
        );

        let mut recent = in_period.clone();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(settings.recent_limit);

        if !capacity_warnings.is_empty() {
            tracing::debug!(
                fiscal_year = %selection.fiscal_year,
                flagged = capacity_warnings.len(),
                "departments near capacity"
            );
        }

        DashboardSummary {
            fiscal_year: selection.fiscal_year,
            quarter: selection.quarter,
            range: selection.range,
            totals: StatusCounts::tally(in_period.iter().copied()),
            departments: loads,
            capacity_warnings,
            quarterly: Self::quarterly_breakdown(records, selection.fiscal_year),
            heatmap: Self::department_quarter_matrix(records, departments, selection.fiscal_year),
            recent: recent.into_iter().cloned().collect(),
        }
    }
}
