//! Status derivation and reconciliation.

use attachee_shared::types::{AttacheeId, DepartmentId};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::types::{AttacheeStatus, CompletionPredicate};
use crate::attachee::{Attachee, AttacheeStore, CreateAttacheeInput, StoreError};
use crate::clock::Clock;
use crate::fiscal::{FiscalCalendar, FiscalError, FiscalYear};

/// Lifecycle rules for placement records.
pub struct StatusService;

impl StatusService {
    /// Status of a placement ending on `end_date`, seen from `as_of`.
    ///
    /// A placement ending on `as_of` itself is already `Completed`.
    #[must_use]
    pub fn derive_status(end_date: NaiveDate, as_of: NaiveDate) -> AttacheeStatus {
        if end_date <= as_of {
            AttacheeStatus::Completed
        } else {
            AttacheeStatus::Active
        }
    }

    /// Whole-number share of the placement elapsed at `as_of`, from 0 to 100.
    ///
    /// Zero before the start date and 100 after the end date. Halves round
    /// away from zero. A placement starting and ending on the same day is
    /// complete once it has started.
    #[must_use]
    pub fn progress_percent(start: NaiveDate, end: NaiveDate, as_of: NaiveDate) -> Decimal {
        if as_of < start {
            return Decimal::ZERO;
        }
        if as_of > end {
            return Decimal::ONE_HUNDRED;
        }

        let total = (end - start).num_days();
        if total <= 0 {
            return Decimal::ONE_HUNDRED;
        }
        let passed = (as_of - start).num_days();

        (Decimal::from(passed) / Decimal::from(total) * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Fills `record.fiscal_year` from its start date if it is blank.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::InvalidDate` if the start date has no
    /// representable fiscal year.
    pub fn assign_fiscal_year(record: &mut Attachee) -> Result<(), FiscalError> {
        if record.fiscal_year.is_none() {
            record.fiscal_year = Some(FiscalCalendar::year_for_date(record.start_date)?);
        }
        Ok(())
    }

    /// Builds a new record from creation input.
    ///
    /// Status is derived against the clock's date and `created_at` is the
    /// clock's instant.
    ///
    /// # Errors
    ///
    /// Returns `FiscalError::Validation` if a fiscal-year label was supplied
    /// but is malformed, and `FiscalError::InvalidDate` if none was supplied
    /// and the start date has no fiscal year.
    pub fn prepare_new<C: Clock>(
        input: CreateAttacheeInput,
        clock: &C,
    ) -> Result<Attachee, FiscalError> {
        let fiscal_year = match input.fiscal_year.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(label) => Some(label.parse::<FiscalYear>()?),
        };

        let mut record = Attachee {
            id: AttacheeId::new(),
            department_id: input.department_id,
            first_name: input.first_name,
            last_name: input.last_name,
            gender: input.gender,
            email: input.email,
            phone: input.phone,
            school: input.school,
            course: input.course,
            location_slot: input.location_slot,
            progress_notes: input.progress_notes,
            start_date: input.start_date,
            end_date: input.end_date,
            status: Self::derive_status(input.end_date, clock.today()),
            fiscal_year,
            created_at: clock.now(),
        };
        Self::assign_fiscal_year(&mut record)?;

        Ok(record)
    }

    /// Completes every active record that ended on or before `as_of`.
    ///
    /// Returns the number of records updated. Safe to run concurrently and
    /// repeatedly: a second pass with the same date updates nothing.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged.
    pub async fn reconcile<S: AttacheeStore>(
        store: &S,
        as_of: NaiveDate,
    ) -> Result<u64, StoreError> {
        Self::apply(store, CompletionPredicate::new(as_of)).await
    }

    /// Same as [`Self::reconcile`], limited to one department.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged.
    pub async fn reconcile_department<S: AttacheeStore>(
        store: &S,
        department: DepartmentId,
        as_of: NaiveDate,
    ) -> Result<u64, StoreError> {
        Self::apply(store, CompletionPredicate::for_department(as_of, department)).await
    }

    /// Reconciles as of the clock's current date.
    ///
    /// # Errors
    ///
    /// Propagates store failures unchanged.
    pub async fn reconcile_today<S: AttacheeStore, C: Clock>(
        store: &S,
        clock: &C,
    ) -> Result<u64, StoreError> {
        Self::reconcile(store, clock.today()).await
    }

    async fn apply<S: AttacheeStore>(
        store: &S,
        predicate: CompletionPredicate,
    ) -> Result<u64, StoreError> {
        let updated = store.complete_matching(predicate).await?;
        if updated > 0 {
            tracing::info!(
                as_of = %predicate.as_of,
                department = ?predicate.department,
                updated,
                "completed attachees past their end date"
            );
        } else {
            tracing::debug!(as_of = %predicate.as_of, "no attachees to complete");
        }
        Ok(updated)
    }
}
