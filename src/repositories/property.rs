//! # Property Repository
//!
//! CRUD operations for properties. Deleting a property is restricted while
//! units or expenses point at it; `delete_cascade` removes the whole subtree
//! in one transaction.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;

use super::required_text;
use super::unit::with_currency_scale;
use crate::error::RepositoryError;
use crate::models::property::{self, Entity as Property};
use crate::models::{expense, payment, tenant, unit};

const NAME_MAX: usize = 100;
const LOCATION_MAX: usize = 255;
const TYPE_MAX: usize = 50;

/// Request data for creating a new property
#[derive(Debug, Clone)]
pub struct CreatePropertyRequest {
    pub name: String,
    pub location: String,
    /// Free-form kind of property, e.g. "apartment"
    pub property_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePropertyRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub property_type: Option<String>,
}

/// Rows removed by [`PropertyRepository::delete_cascade`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeDeleteSummary {
    pub payments: u64,
    pub tenants: u64,
    pub units: u64,
    pub expenses: u64,
}

/// Repository for Property database operations
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl PropertyRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a new property
    pub async fn create(
        &self,
        request: CreatePropertyRequest,
    ) -> Result<property::Model, RepositoryError> {
        required_text("name", &request.name, NAME_MAX)?;
        required_text("location", &request.location, LOCATION_MAX)?;
        required_text("type", &request.property_type, TYPE_MAX)?;

        let property = property::ActiveModel {
            name: Set(request.name),
            location: Set(request.location),
            property_type: Set(request.property_type),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::info!(property_id = property.id, "property created");
        Ok(property)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<property::Model>, RepositoryError> {
        Property::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List all properties ordered by name
    pub async fn list(&self) -> Result<Vec<property::Model>, RepositoryError> {
        Property::find()
            .order_by_asc(property::Column::Name)
            .order_by_asc(property::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdatePropertyRequest,
    ) -> Result<property::Model, RepositoryError> {
        let property = self
            .get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("property", id))?;
        let mut active = property.into_active_model();

        if let Some(name) = request.name {
            required_text("name", &name, NAME_MAX)?;
            active.name = Set(name);
        }
        if let Some(location) = request.location {
            required_text("location", &location, LOCATION_MAX)?;
            active.location = Set(location);
        }
        if let Some(property_type) = request.property_type {
            required_text("type", &property_type, TYPE_MAX)?;
            active.property_type = Set(property_type);
        }

        let property = active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(property_id = property.id, "property updated");
        Ok(property)
    }

    /// Delete a property that owns nothing
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` while units or expenses reference it.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = Property::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("property", id));
        }

        tracing::info!(property_id = id, "property deleted");
        Ok(())
    }

    /// Delete a property together with its units, their tenants and payments,
    /// and its expenses, all in one transaction.
    ///
    /// Activity logs are left alone; their `record_id` is not a foreign key.
    pub async fn delete_cascade(&self, id: i32) -> Result<CascadeDeleteSummary, RepositoryError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(RepositoryError::database_error)?;

        if Property::find_by_id(id)
            .one(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .is_none()
        {
            return Err(RepositoryError::not_found("property", id));
        }

        let unit_ids: Vec<i32> = unit::Entity::find()
            .select_only()
            .column(unit::Column::Id)
            .filter(unit::Column::PropertyId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        let tenant_ids: Vec<i32> = tenant::Entity::find()
            .select_only()
            .column(tenant::Column::Id)
            .filter(tenant::Column::UnitId.is_in(unit_ids.clone()))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        let mut summary = CascadeDeleteSummary::default();

        summary.payments = payment::Entity::delete_many()
            .filter(
                Condition::any()
                    .add(payment::Column::UnitId.is_in(unit_ids.clone()))
                    .add(payment::Column::TenantId.is_in(tenant_ids.clone())),
            )
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .rows_affected;

        summary.tenants = tenant::Entity::delete_many()
            .filter(tenant::Column::Id.is_in(tenant_ids))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .rows_affected;

        summary.units = unit::Entity::delete_many()
            .filter(unit::Column::PropertyId.eq(id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .rows_affected;

        summary.expenses = expense::Entity::delete_many()
            .filter(expense::Column::PropertyId.eq(id))
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?
            .rows_affected;

        Property::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(RepositoryError::database_error)?;

        txn.commit().await.map_err(RepositoryError::database_error)?;

        tracing::warn!(
            property_id = id,
            payments = summary.payments,
            tenants = summary.tenants,
            units = summary.units,
            expenses = summary.expenses,
            "property deleted with all dependent records"
        );
        Ok(summary)
    }

    /// Fetch a property and its units in one query
    pub async fn get_with_units(
        &self,
        id: i32,
    ) -> Result<Option<(property::Model, Vec<unit::Model>)>, RepositoryError> {
        let rows = Property::find_by_id(id)
            .find_with_related(unit::Entity)
            .order_by_asc(unit::Column::UnitNumber)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(rows.into_iter().next().map(|(property, units)| {
            let units = units.into_iter().map(with_currency_scale).collect();
            (property, units)
        }))
    }
}
