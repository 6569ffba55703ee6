//! # Tenant Repository
//!
//! This module contains the repository implementation for Tenant entities,
//! the people occupying a unit. A tenant starts `active` and may move to
//! `left` exactly once.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use super::required_text;
use crate::error::RepositoryError;
use crate::models::tenant::{self, Entity as Tenant, TenantStatus};

const FULL_NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 100;
const PHONE_MAX: usize = 20;
const ID_NUMBER_MAX: usize = 50;

/// Request data for creating a new tenant
#[derive(Debug, Clone)]
pub struct CreateTenantRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// National ID or passport number
    pub id_number: String,
    pub move_in_date: NaiveDate,
    pub unit_id: i32,
}

/// Tenant details that may be edited. Status changes go through
/// [`TenantRepository::mark_left`] or [`TenantRepository::change_status`].
#[derive(Debug, Clone, Default)]
pub struct UpdateTenantRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub move_in_date: Option<NaiveDate>,
    pub unit_id: Option<i32>,
}

/// Repository for Tenant database operations
#[derive(Debug, Clone)]
pub struct TenantRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl TenantRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new tenant with status `active`
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if `unit_id` does not exist and
    /// `UniqueViolation` if the email is already registered.
    pub async fn create(
        &self,
        request: CreateTenantRequest,
    ) -> Result<tenant::Model, RepositoryError> {
        required_text("full_name", &request.full_name, FULL_NAME_MAX)?;
        required_text("email", &request.email, EMAIL_MAX)?;
        required_text("phone", &request.phone, PHONE_MAX)?;
        required_text("id_number", &request.id_number, ID_NUMBER_MAX)?;

        let tenant = tenant::ActiveModel {
            full_name: Set(request.full_name),
            email: Set(request.email),
            phone: Set(request.phone),
            id_number: Set(request.id_number),
            move_in_date: Set(request.move_in_date),
            unit_id: Set(request.unit_id),
            status: Set(TenantStatus::default()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::info!(tenant_id = tenant.id, unit_id = tenant.unit_id, "tenant created");
        Ok(tenant)
    }

    /// Get tenant by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<tenant::Model>, RepositoryError> {
        Tenant::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<tenant::Model>, RepositoryError> {
        Tenant::find()
            .filter(tenant::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List all tenants
    pub async fn list(&self) -> Result<Vec<tenant::Model>, RepositoryError> {
        Tenant::find()
            .order_by_asc(tenant::Column::FullName)
            .order_by_asc(tenant::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Tenants of one unit, current and former, by move-in date
    pub async fn list_by_unit(&self, unit_id: i32) -> Result<Vec<tenant::Model>, RepositoryError> {
        Tenant::find()
            .filter(tenant::Column::UnitId.eq(unit_id))
            .order_by_asc(tenant::Column::MoveInDate)
            .order_by_asc(tenant::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_by_status(
        &self,
        status: TenantStatus,
    ) -> Result<Vec<tenant::Model>, RepositoryError> {
        Tenant::find()
            .filter(tenant::Column::Status.eq(status))
            .order_by_asc(tenant::Column::FullName)
            .order_by_asc(tenant::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Update tenant details
    pub async fn update(
        &self,
        id: i32,
        request: UpdateTenantRequest,
    ) -> Result<tenant::Model, RepositoryError> {
        let tenant = self.require(id).await?;
        let mut active = tenant.into_active_model();

        if let Some(full_name) = request.full_name {
            required_text("full_name", &full_name, FULL_NAME_MAX)?;
            active.full_name = Set(full_name);
        }
        if let Some(email) = request.email {
            required_text("email", &email, EMAIL_MAX)?;
            active.email = Set(email);
        }
        if let Some(phone) = request.phone {
            required_text("phone", &phone, PHONE_MAX)?;
            active.phone = Set(phone);
        }
        if let Some(id_number) = request.id_number {
            required_text("id_number", &id_number, ID_NUMBER_MAX)?;
            active.id_number = Set(id_number);
        }
        if let Some(move_in_date) = request.move_in_date {
            active.move_in_date = Set(move_in_date);
        }
        if let Some(unit_id) = request.unit_id {
            active.unit_id = Set(unit_id);
        }

        let tenant = active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(tenant_id = tenant.id, "tenant updated");
        Ok(tenant)
    }

    /// Record that the tenant moved out
    pub async fn mark_left(&self, id: i32) -> Result<tenant::Model, RepositoryError> {
        self.change_status(id, TenantStatus::Left).await
    }

    /// Move a tenant to `next`, rejecting anything but `active` to `left`.
    ///
    /// The write only matches a row still in the status that was checked, so a
    /// concurrent change makes this call fail instead of applying twice.
    pub async fn change_status(
        &self,
        id: i32,
        next: TenantStatus,
    ) -> Result<tenant::Model, RepositoryError> {
        let current = self.require(id).await?.status;
        if !current.can_transition_to(next) {
            return Err(invalid_transition(current, next));
        }

        let result = Tenant::update_many()
            .set(tenant::ActiveModel {
                status: Set(next),
                ..Default::default()
            })
            .filter(tenant::Column::Id.eq(id))
            .filter(tenant::Column::Status.eq(current))
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        let tenant = self.require(id).await?;
        if result.rows_affected == 0 {
            return Err(invalid_transition(tenant.status, next));
        }

        tracing::info!(tenant_id = tenant.id, from = %current, to = %next, "tenant status changed");
        Ok(tenant)
    }

    /// Delete a tenant
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` while payments reference the tenant.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = Tenant::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("tenant", id));
        }

        tracing::info!(tenant_id = id, "tenant deleted");
        Ok(())
    }

    async fn require(&self, id: i32) -> Result<tenant::Model, RepositoryError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("tenant", id))
    }
}

fn invalid_transition(from: TenantStatus, to: TenantStatus) -> RepositoryError {
    RepositoryError::InvalidTransition {
        entity: "tenant",
        from: from.to_string(),
        to: to.to_string(),
    }
}
