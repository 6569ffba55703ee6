//! Property entity model
//!
//! This module contains the SeaORM entity model for the properties table,
//! the building or asset that owns rentable units.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

/// Property entity representing a building or asset
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    /// Auto-incrementing identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name of the property
    pub name: String,

    /// Street address or area
    pub location: String,

    /// Free-form kind of property (apartment block, house, shop, ...)
    #[sea_orm(column_name = "type")]
    pub property_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::unit::Entity")]
    Units,
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Units.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
