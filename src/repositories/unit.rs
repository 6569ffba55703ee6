//! # Unit Repository
//!
//! CRUD operations for rentable units within a property.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;

use super::required_text;
use crate::error::RepositoryError;
use crate::models::money;
use crate::models::property;
use crate::models::unit::{self, Entity as Unit};

const UNIT_NUMBER_MAX: usize = 20;

/// Request data for creating a new unit
#[derive(Debug, Clone)]
pub struct CreateUnitRequest {
    pub property_id: i32,
    pub unit_number: String,
    /// Monthly rent, rounded to two places on write
    pub rent_amount: Decimal,
    pub max_tenants: Option<i32>,
}

/// Fields that may be changed on an existing unit.
///
/// `max_tenants: Some(None)` clears the limit.
#[derive(Debug, Clone, Default)]
pub struct UpdateUnitRequest {
    pub property_id: Option<i32>,
    pub unit_number: Option<String>,
    pub rent_amount: Option<Decimal>,
    pub max_tenants: Option<Option<i32>>,
}

/// Repository for Unit database operations
#[derive(Debug, Clone)]
pub struct UnitRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl UnitRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a new unit
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if `property_id` does not exist and
    /// `Validation` for a negative rent or a non-positive tenant limit.
    pub async fn create(&self, request: CreateUnitRequest) -> Result<unit::Model, RepositoryError> {
        required_text("unit_number", &request.unit_number, UNIT_NUMBER_MAX)?;
        let rent_amount = money::non_negative("rent_amount", request.rent_amount)?;
        validate_max_tenants(request.max_tenants)?;

        let unit = unit::ActiveModel {
            property_id: Set(request.property_id),
            unit_number: Set(request.unit_number),
            rent_amount: Set(rent_amount),
            max_tenants: Set(request.max_tenants),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::info!(
            unit_id = unit.id,
            property_id = unit.property_id,
            "unit created"
        );
        Ok(with_currency_scale(unit))
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<unit::Model>, RepositoryError> {
        let unit = Unit::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(unit.map(with_currency_scale))
    }

    pub async fn list(&self) -> Result<Vec<unit::Model>, RepositoryError> {
        let units = Unit::find()
            .order_by_asc(unit::Column::PropertyId)
            .order_by_asc(unit::Column::UnitNumber)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(units.into_iter().map(with_currency_scale).collect())
    }

    /// List the units of one property ordered by unit number
    pub async fn list_by_property(
        &self,
        property_id: i32,
    ) -> Result<Vec<unit::Model>, RepositoryError> {
        let units = Unit::find()
            .filter(unit::Column::PropertyId.eq(property_id))
            .order_by_asc(unit::Column::UnitNumber)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;
        Ok(units.into_iter().map(with_currency_scale).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        request: UpdateUnitRequest,
    ) -> Result<unit::Model, RepositoryError> {
        let unit = Unit::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("unit", id))?;
        let mut active = unit.into_active_model();

        if let Some(property_id) = request.property_id {
            active.property_id = Set(property_id);
        }
        if let Some(unit_number) = request.unit_number {
            required_text("unit_number", &unit_number, UNIT_NUMBER_MAX)?;
            active.unit_number = Set(unit_number);
        }
        if let Some(rent_amount) = request.rent_amount {
            active.rent_amount = Set(money::non_negative("rent_amount", rent_amount)?);
        }
        if let Some(max_tenants) = request.max_tenants {
            validate_max_tenants(max_tenants)?;
            active.max_tenants = Set(max_tenants);
        }

        let unit = active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(unit_id = unit.id, "unit updated");
        Ok(with_currency_scale(unit))
    }

    /// Delete a unit
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` while tenants or payments reference it.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = Unit::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("unit", id));
        }

        tracing::info!(unit_id = id, "unit deleted");
        Ok(())
    }

    /// Fetch a unit together with the property that owns it
    pub async fn get_with_property(
        &self,
        id: i32,
    ) -> Result<Option<(unit::Model, property::Model)>, RepositoryError> {
        let row = Unit::find_by_id(id)
            .find_also_related(property::Entity)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        match row {
            None => Ok(None),
            Some((unit, Some(property))) => Ok(Some((with_currency_scale(unit), property))),
            Some((unit, None)) => Err(RepositoryError::not_found("property", unit.property_id)),
        }
    }
}

/// Fix `rent_amount` at two fractional digits.
pub(crate) fn with_currency_scale(mut unit: unit::Model) -> unit::Model {
    unit.rent_amount = money::rescaled(unit.rent_amount);
    unit
}

fn validate_max_tenants(max_tenants: Option<i32>) -> Result<(), RepositoryError> {
    match max_tenants {
        Some(limit) if limit <= 0 => Err(RepositoryError::validation_error(format!(
            "max_tenants must be positive (got {limit})"
        ))),
        _ => Ok(()),
    }
}
