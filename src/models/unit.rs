//! Unit entity model
//!
//! This module contains the SeaORM entity model for the units table. A unit
//! is a single rentable space inside a property.

use super::property::Entity as Property;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Unit entity representing a rentable space
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "units")]
pub struct Model {
    /// Auto-incrementing identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning property
    pub property_id: i32,

    /// Door or flat number, unique only by convention
    pub unit_number: String,

    /// Monthly rent, NUMERIC(10, 2)
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub rent_amount: Decimal,

    /// Occupancy cap; `None` means unlimited
    pub max_tenants: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Property",
        from = "Column::PropertyId",
        to = "super::property::Column::Id",
        on_delete = "Restrict"
    )]
    Property,
    #[sea_orm(has_many = "super::tenant::Entity")]
    Tenants,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<Property> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::tenant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tenants.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
