//! User entity model
//!
//! This module contains the SeaORM entity model for the users table, which
//! stores staff accounts together with their role and permission flags.

use std::fmt;
use std::str::FromStr;

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;

use crate::error::RepositoryError;

/// Account role. Admins are not restricted by the permission flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum UserRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[default]
    #[sea_orm(string_value = "EMPLOYEE")]
    Employee,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "ADMIN"),
            UserRole::Employee => write!(f, "EMPLOYEE"),
        }
    }
}

impl FromStr for UserRole {
    type Err = RepositoryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(UserRole::Admin),
            "EMPLOYEE" => Ok(UserRole::Employee),
            other => Err(RepositoryError::invalid_enum("role", other)),
        }
    }
}

/// User entity representing a staff account
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Auto-incrementing identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Login name, unique across users
    #[sea_orm(unique)]
    pub username: String,

    /// Contact email, unique across users
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 PHC string; never the plaintext password
    pub password_hash: String,

    pub role: UserRole,

    pub can_add_payments: bool,
    pub can_add_expenses: bool,
    pub can_add_tenants: bool,
    pub can_edit_records: bool,
    pub can_view_reports: bool,

    /// Deactivated accounts keep their history but should not sign in
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
    #[sea_orm(has_many = "super::activity_log::Entity")]
    ActivityLogs,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// The five permission flags stored on every user row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UserPermissions {
    pub can_add_payments: bool,
    pub can_add_expenses: bool,
    pub can_add_tenants: bool,
    pub can_edit_records: bool,
    pub can_view_reports: bool,
}

impl Default for UserPermissions {
    fn default() -> Self {
        Self {
            can_add_payments: true,
            can_add_expenses: true,
            can_add_tenants: true,
            can_edit_records: false,
            can_view_reports: false,
        }
    }
}

impl UserPermissions {
    /// Every flag set.
    pub fn all() -> Self {
        Self {
            can_add_payments: true,
            can_add_expenses: true,
            can_add_tenants: true,
            can_edit_records: true,
            can_view_reports: true,
        }
    }

    /// Copy the flags onto an active model.
    pub fn apply(&self, model: &mut ActiveModel) {
        model.can_add_payments = sea_orm::Set(self.can_add_payments);
        model.can_add_expenses = sea_orm::Set(self.can_add_expenses);
        model.can_add_tenants = sea_orm::Set(self.can_add_tenants);
        model.can_edit_records = sea_orm::Set(self.can_edit_records);
        model.can_view_reports = sea_orm::Set(self.can_view_reports);
    }
}

impl From<&Model> for UserPermissions {
    fn from(user: &Model) -> Self {
        Self {
            can_add_payments: user.can_add_payments,
            can_add_expenses: user.can_add_expenses,
            can_add_tenants: user.can_add_tenants,
            can_edit_records: user.can_edit_records,
            can_view_reports: user.can_view_reports,
        }
    }
}
