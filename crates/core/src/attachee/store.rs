//! Record store seam implemented by the db crate.

use std::future::Future;

use attachee_shared::types::DepartmentId;

use super::error::StoreError;
use super::filter::CompletedFilter;
use super::types::Attachee;
use crate::fiscal::{DateRange, FiscalYear};
use crate::status::CompletionPredicate;

/// Storage collaborator for attachee records.
///
/// Implementations own the atomicity of their writes; callers do not retry.
pub trait AttacheeStore: Send + Sync {
    /// Attachees whose placement overlaps `range`, optionally for one department.
    fn find_in_range(
        &self,
        range: DateRange,
        department: Option<DepartmentId>,
    ) -> impl Future<Output = Result<Vec<Attachee>, StoreError>> + Send;

    /// Attachees booked against `fiscal_year`, optionally for one department.
    fn find_by_fiscal_year(
        &self,
        fiscal_year: FiscalYear,
        department: Option<DepartmentId>,
    ) -> impl Future<Output = Result<Vec<Attachee>, StoreError>> + Send;

    /// Completed attachees matching `filter`, latest end date first.
    fn find_completed(
        &self,
        filter: CompletedFilter,
    ) -> impl Future<Output = Result<Vec<Attachee>, StoreError>> + Send;

    /// Marks every record matching `predicate` as completed.
    ///
    /// Returns the number of records changed. Records that are already
    /// completed must not be counted.
    fn complete_matching(
        &self,
        predicate: CompletionPredicate,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
