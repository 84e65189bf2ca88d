//! Attachee repository for database operations.
//!
//! Implements the core [`AttacheeStore`] seam plus the CRUD operations the
//! record screens need.

use attachee_core::attachee::{
    Attachee, AttacheeStore, CompletedFilter, CreateAttacheeInput, StoreError,
};
use attachee_core::fiscal::{DateRange, FiscalYear};
use attachee_core::status::{AttacheeStatus, CompletionPredicate, StatusService};
use attachee_shared::types::{AttacheeId, DepartmentId};
use attachee_core::clock::Clock;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::entities::{attachees, departments, sea_orm_active_enums::AttacheeStatus as DbStatus};

/// Attachee repository implementation.
#[derive(Debug, Clone)]
pub struct AttacheeRepository {
    db: DatabaseConnection,
}

impl AttacheeRepository {
    /// Create a new attachee repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an attachee, deriving its status and fiscal year.
    ///
    /// `clock` supplies the date status is derived against and the
    /// `created_at` stamp.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DepartmentNotFound` for an unknown department,
    /// `StoreError::Invalid` for a malformed fiscal-year label, and
    /// `StoreError::Repository` if the insert fails.
    pub async fn create<C: Clock>(
        &self,
        input: CreateAttacheeInput,
        clock: &C,
    ) -> Result<Attachee, StoreError> {
        let department_id = input.department_id;
        let exists = departments::Entity::find_by_id(department_id.into_inner())
            .count(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;
        if exists == 0 {
            return Err(StoreError::DepartmentNotFound(department_id));
        }

        let record = StatusService::prepare_new(input, clock)?;

        let model = attachees::ActiveModel {
            id: Set(record.id.into_inner()),
            department_id: Set(record.department_id.into_inner()),
            first_name: Set(record.first_name.clone()),
            last_name: Set(record.last_name.clone()),
            gender: Set(record.gender.clone()),
            email: Set(record.email.clone()),
            phone: Set(record.phone.clone()),
            school: Set(record.school.clone()),
            course: Set(record.course.clone()),
            location_slot: Set(record.location_slot.clone()),
            progress_notes: Set(record.progress_notes.clone()),
            start_date: Set(record.start_date),
            end_date: Set(record.end_date),
            status: Set(to_db_status(record.status)),
            fiscal_year: Set(record.fiscal_year.map(FiscalYear::label)),
            created_at: Set(record.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| StoreError::repository(e.to_string()))?;

        tracing::info!(
            attachee_id = %model.id,
            department_id = %model.department_id,
            status = ?model.status,
            "attachee created"
        );
        Ok(to_domain(model))
    }

    /// Finds an attachee by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the query fails.
    pub async fn find_by_id(&self, id: AttacheeId) -> Result<Option<Attachee>, StoreError> {
        let model = attachees::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    /// Most recently created attachees whose placement overlaps `range`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the query fails.
    pub async fn recent(&self, range: DateRange, limit: u64) -> Result<Vec<Attachee>, StoreError> {
        let models = overlapping(range)
            .order_by_desc(attachees::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    /// Deletes an attachee.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no such attachee exists and
    /// `StoreError::Repository` if the delete fails.
    pub async fn delete(&self, id: AttacheeId) -> Result<(), StoreError> {
        let result = attachees::Entity::delete_by_id(id.into_inner())
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(StoreError::NotFound(id));
        }
        tracing::info!(attachee_id = %id, "attachee deleted");
        Ok(())
    }
}

impl AttacheeStore for AttacheeRepository {
    async fn find_in_range(
        &self,
        range: DateRange,
        department: Option<DepartmentId>,
    ) -> Result<Vec<Attachee>, StoreError> {
        let mut query = overlapping(range);
        if let Some(department) = department {
            query = query.filter(attachees::Column::DepartmentId.eq(department.into_inner()));
        }

        let models = query
            .order_by_asc(attachees::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_by_fiscal_year(
        &self,
        fiscal_year: FiscalYear,
        department: Option<DepartmentId>,
    ) -> Result<Vec<Attachee>, StoreError> {
        let mut query =
            attachees::Entity::find().filter(attachees::Column::FiscalYear.eq(fiscal_year.label()));
        if let Some(department) = department {
            query = query.filter(attachees::Column::DepartmentId.eq(department.into_inner()));
        }

        let models = query
            .order_by_asc(attachees::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }

    async fn find_completed(&self, filter: CompletedFilter) -> Result<Vec<Attachee>, StoreError> {
        let mut query =
            attachees::Entity::find().filter(attachees::Column::Status.eq(DbStatus::Completed));
        if let Some(range) = filter.end_date_range() {
            query = query
                .filter(attachees::Column::EndDate.gte(range.start))
                .filter(attachees::Column::EndDate.lte(range.end));
        }
        if let Some(department) = filter.department {
            query = query.filter(attachees::Column::DepartmentId.eq(department.into_inner()));
        }
        if let Some(school) = filter.school() {
            query = query.filter(attachees::Column::School.eq(school));
        }
        if let Some(location) = filter.location() {
            query = query.filter(attachees::Column::LocationSlot.contains(location));
        }

        let models = query
            .order_by_desc(attachees::Column::EndDate)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        // Quarter without a fiscal year is checked against the end-date month.
        let mut records: Vec<Attachee> = models.into_iter().map(to_domain).collect();
        records.retain(|r| filter.matches(r));
        Ok(records)
    }

    async fn complete_matching(&self, predicate: CompletionPredicate) -> Result<u64, StoreError> {
        // Single conditional UPDATE; rows already Completed never match.
        let mut update = attachees::Entity::update_many()
            .col_expr(attachees::Column::Status, Expr::value(DbStatus::Completed))
            .filter(attachees::Column::Status.eq(DbStatus::Active))
            .filter(attachees::Column::EndDate.lte(predicate.as_of));
        if let Some(department) = predicate.department {
            update = update.filter(attachees::Column::DepartmentId.eq(department.into_inner()));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        Ok(result.rows_affected)
    }
}

/// Rows whose placement shares at least one day with `range`.
fn overlapping(range: DateRange) -> Select<attachees::Entity> {
    attachees::Entity::find()
        .filter(attachees::Column::StartDate.lte(range.end))
        .filter(attachees::Column::EndDate.gte(range.start))
}

fn to_db_status(status: AttacheeStatus) -> DbStatus {
    match status {
        AttacheeStatus::Active => DbStatus::Active,
        AttacheeStatus::Completed => DbStatus::Completed,
    }
}

fn from_db_status(status: DbStatus) -> AttacheeStatus {
    match status {
        DbStatus::Active => AttacheeStatus::Active,
        DbStatus::Completed => AttacheeStatus::Completed,
    }
}

/// Reads a stored fiscal-year label; unreadable labels come back as `None`.
fn parse_stored_label(id: AttacheeId, raw: Option<&str>) -> Option<FiscalYear> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(fiscal_year) => Some(fiscal_year),
        Err(_) => {
            tracing::warn!(
                attachee_id = %id,
                label = raw,
                "ignoring unreadable stored fiscal year"
            );
            None
        }
    }
}

/// Convert database model to domain attachee.
fn to_domain(model: attachees::Model) -> Attachee {
    let id = AttacheeId::from_uuid(model.id);
    Attachee {
        id,
        department_id: DepartmentId::from_uuid(model.department_id),
        fiscal_year: parse_stored_label(id, model.fiscal_year.as_deref()),
        first_name: model.first_name,
        last_name: model.last_name,
        gender: model.gender,
        email: model.email,
        phone: model.phone,
        school: model.school,
        course: model.course,
        location_slot: model.location_slot,
        progress_notes: model.progress_notes,
        start_date: model.start_date,
        end_date: model.end_date,
        status: from_db_status(model.status),
        created_at: model.created_at,
    }
}
