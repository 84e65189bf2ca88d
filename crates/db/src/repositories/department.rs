//! Department repository for database operations.

use attachee_core::attachee::{Department, StoreError};
use attachee_shared::types::DepartmentId;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::departments;

/// Department repository implementation.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    db: DatabaseConnection,
}

impl DepartmentRepository {
    /// Create a new department repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a department.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the capacity does not fit the
    /// column or the insert fails, for example on a duplicate name.
    pub async fn create(
        &self,
        name: &str,
        max_capacity: Option<u32>,
    ) -> Result<Department, StoreError> {
        let max_capacity = max_capacity
            .map(i32::try_from)
            .transpose()
            .map_err(|_| StoreError::repository("max capacity out of range"))?;

        let model = departments::ActiveModel {
            id: Set(DepartmentId::new().into_inner()),
            name: Set(name.trim().to_string()),
            max_capacity: Set(max_capacity),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| StoreError::repository(e.to_string()))?;

        tracing::info!(department_id = %model.id, name = %model.name, "department created");
        Ok(to_domain(model))
    }

    /// Finds a department by ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the query fails.
    pub async fn find_by_id(&self, id: DepartmentId) -> Result<Option<Department>, StoreError> {
        let model = departments::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        Ok(model.map(to_domain))
    }

    /// Lists every department ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Repository` if the query fails.
    pub async fn list(&self) -> Result<Vec<Department>, StoreError> {
        let models = departments::Entity::find()
            .order_by_asc(departments::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| StoreError::repository(e.to_string()))?;

        Ok(models.into_iter().map(to_domain).collect())
    }
}

/// Convert database model to domain department.
fn to_domain(model: departments::Model) -> Department {
    Department {
        id: DepartmentId::from_uuid(model.id),
        name: model.name,
        // A negative stored capacity is treated as unset.
        max_capacity: model.max_capacity.and_then(|c| u32::try_from(c).ok()),
    }
}
