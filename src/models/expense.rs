//! Expense entity model
//!
//! This module contains the SeaORM entity model for the expenses table,
//! costs incurred by a property.

use std::fmt;
use std::str::FromStr;

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::error::RepositoryError;

/// Closed set of expense categories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ExpenseCategory {
    #[sea_orm(string_value = "maintenance")]
    Maintenance,
    #[sea_orm(string_value = "electricity")]
    Electricity,
    #[sea_orm(string_value = "water")]
    Water,
    #[sea_orm(string_value = "other")]
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseCategory::Maintenance => write!(f, "maintenance"),
            ExpenseCategory::Electricity => write!(f, "electricity"),
            ExpenseCategory::Water => write!(f, "water"),
            ExpenseCategory::Other => write!(f, "other"),
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = RepositoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "maintenance" => Ok(ExpenseCategory::Maintenance),
            "electricity" => Ok(ExpenseCategory::Electricity),
            "water" => Ok(ExpenseCategory::Water),
            "other" => Ok(ExpenseCategory::Other),
            other => Err(RepositoryError::invalid_enum("category", other)),
        }
    }
}

/// Expense entity representing a cost booked against a property
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Auto-incrementing identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Property the cost belongs to
    pub property_id: i32,

    pub category: ExpenseCategory,

    /// Amount spent, NUMERIC(10, 2)
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,

    pub expense_date: Date,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// User who recorded the expense
    pub created_by: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to = "super::property::Column::Id",
        on_delete = "Restrict"
    )]
    Property,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    Creator,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Property.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn test_category_parsing() {
        assert_eq!(
            "maintenance".parse::<ExpenseCategory>().unwrap(),
            ExpenseCategory::Maintenance
        );
        assert_eq!("water".parse::<ExpenseCategory>().unwrap(), ExpenseCategory::Water);

        let err = "rent".parse::<ExpenseCategory>().unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::InvalidEnumValue { field: "category", ref value } if value == "rent"
        ));
    }

    #[test]
    fn test_category_display_matches_stored_value() {
        for category in ExpenseCategory::iter() {
            assert_eq!(category.to_string(), category.to_value());
        }
    }
}
