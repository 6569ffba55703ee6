//! # Activity Log Repository
//!
//! Append-only audit trail. `record_id` names a row in `table_name` but is
//! not a foreign key, so entries outlive the rows they describe. There is
//! no update or delete.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::sync::Arc;

use super::required_text;
use crate::error::RepositoryError;
use crate::models::activity_log::{self, Entity as ActivityLog};

const ACTION_MAX: usize = 255;
const TABLE_NAME_MAX: usize = 50;

/// One audit entry to append
#[derive(Debug, Clone)]
pub struct CreateActivityLogRequest {
    /// Acting user
    pub user_id: i32,
    /// Free text, e.g. "Added payment"
    pub action: String,
    pub table_name: String,
    pub record_id: i32,
}

/// Repository for ActivityLog database operations
#[derive(Debug, Clone)]
pub struct ActivityLogRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl ActivityLogRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Append an entry stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns `ForeignKeyViolation` if `user_id` does not exist. The
    /// `record_id` is never checked.
    pub async fn append(
        &self,
        request: CreateActivityLogRequest,
    ) -> Result<activity_log::Model, RepositoryError> {
        required_text("action", &request.action, ACTION_MAX)?;
        required_text("table_name", &request.table_name, TABLE_NAME_MAX)?;

        let entry = activity_log::ActiveModel {
            user_id: Set(request.user_id),
            action: Set(request.action),
            table_name: Set(request.table_name),
            record_id: Set(request.record_id),
            timestamp: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&*self.db)
        .await
        .map_err(RepositoryError::database_error)?;

        tracing::debug!(
            activity_log_id = entry.id,
            user_id = entry.user_id,
            table_name = %entry.table_name,
            record_id = entry.record_id,
            "activity logged"
        );
        Ok(entry)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<activity_log::Model>, RepositoryError> {
        ActivityLog::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// The `limit` newest entries
    pub async fn list_recent(&self, limit: u64) -> Result<Vec<activity_log::Model>, RepositoryError> {
        ActivityLog::find()
            .order_by_desc(activity_log::Column::Timestamp)
            .order_by_desc(activity_log::Column::Id)
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn list_by_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<activity_log::Model>, RepositoryError> {
        ActivityLog::find()
            .filter(activity_log::Column::UserId.eq(user_id))
            .order_by_desc(activity_log::Column::Timestamp)
            .order_by_desc(activity_log::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// History of one row, oldest first
    pub async fn list_for_record(
        &self,
        table_name: &str,
        record_id: i32,
    ) -> Result<Vec<activity_log::Model>, RepositoryError> {
        ActivityLog::find()
            .filter(activity_log::Column::TableName.eq(table_name))
            .filter(activity_log::Column::RecordId.eq(record_id))
            .order_by_asc(activity_log::Column::Timestamp)
            .order_by_asc(activity_log::Column::Id)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }
}
