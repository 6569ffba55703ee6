//! Tenant entity model
//!
//! This module contains the SeaORM entity model for the tenants table. A
//! tenant occupies exactly one unit and moves through two states only:
//! `active`, then `left`.

use std::fmt;
use std::str::FromStr;

use super::unit::Entity as Unit;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

use crate::error::RepositoryError;

/// Occupancy state of a tenant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TenantStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "left")]
    Left,
}

impl TenantStatus {
    /// Whether moving from `self` to `next` is allowed. Only active -> left is.
    pub fn can_transition_to(self, next: TenantStatus) -> bool {
        matches!((self, next), (TenantStatus::Active, TenantStatus::Left))
    }
}

impl fmt::Display for TenantStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TenantStatus::Active => write!(f, "active"),
            TenantStatus::Left => write!(f, "left"),
        }
    }
}

impl FromStr for TenantStatus {
    type Err = RepositoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(TenantStatus::Active),
            "left" => Ok(TenantStatus::Left),
            other => Err(RepositoryError::invalid_enum("status", other)),
        }
    }
}

/// Tenant entity representing an occupant of a unit
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tenants")]
pub struct Model {
    /// Auto-incrementing identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    pub full_name: String,

    /// Contact email, unique across tenants
    #[sea_orm(unique)]
    pub email: String,

    pub phone: String,

    /// National ID or passport number
    pub id_number: String,

    pub move_in_date: Date,

    /// Occupied unit
    pub unit_id: i32,

    pub status: TenantStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Unit",
        from = "Column::UnitId",
        to = "super::unit::Column::Id",
        on_delete = "Restrict"
    )]
    Unit,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<Unit> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(TenantStatus::Active.can_transition_to(TenantStatus::Left));
        assert!(!TenantStatus::Left.can_transition_to(TenantStatus::Active));
        assert!(!TenantStatus::Left.can_transition_to(TenantStatus::Left));
        assert!(!TenantStatus::Active.can_transition_to(TenantStatus::Active));
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse::<TenantStatus>().unwrap(), TenantStatus::Active);
        assert_eq!("left".parse::<TenantStatus>().unwrap(), TenantStatus::Left);
        assert!("evicted".parse::<TenantStatus>().is_err());
    }
}
