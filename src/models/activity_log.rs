//! ActivityLog entity model
//!
//! This module contains the SeaORM entity model for the activity_logs table,
//! the append-only audit trail of user actions. `record_id` is a loose
//! reference into `table_name` and carries no foreign key.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// ActivityLog entity representing one audited action
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    /// Auto-incrementing identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Acting user
    pub user_id: i32,

    /// Action label, e.g. `REVENUE_ENTRY`
    pub action: String,

    /// Table the action touched
    pub table_name: String,

    /// Row id inside `table_name`; not checked
    pub record_id: i32,

    pub timestamp: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Restrict"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
