//! Reporting over attachee records.
//!
//! Everything here is a pure function of the records passed in. Callers read
//! the records for a [`crate::fiscal::PeriodSelection`] from the store first.

mod service;
mod types;


pub use service::AggregationService;
pub use types::{
    CapacityWarning, DashboardSettings, DashboardSummary, DepartmentLoad, DepartmentQuarterRow,
    GroupBy, GroupKey, StatusCounts, DEFAULT_MAX_CAPACITY, DEFAULT_WARNING_THRESHOLD,
};
