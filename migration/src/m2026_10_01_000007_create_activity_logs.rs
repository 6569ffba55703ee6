//! Migration to create the activity_logs table.
//!
//! `record_id` points at a row in whatever table `table_name` names. It has no
//! foreign key, so a log entry survives the row it describes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActivityLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ActivityLogs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ActivityLogs::UserId).integer().not_null())
                    .col(ColumnDef::new(ActivityLogs::Action).string_len(255).not_null())
                    .col(ColumnDef::new(ActivityLogs::TableName).string_len(50).not_null())
                    .col(ColumnDef::new(ActivityLogs::RecordId).integer().not_null())
                    .col(
                        ColumnDef::new(ActivityLogs::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_activity_logs_user_id")
                            .from(ActivityLogs::Table, ActivityLogs::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_activity_logs_user_id")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::UserId)
                    .to_owned(),
            )
            .await?;

        // Lookups of the audit trail for a single record
        manager
            .create_index(
                Index::create()
                    .name("idx_activity_logs_table_record")
                    .table(ActivityLogs::Table)
                    .col(ActivityLogs::TableName)
                    .col(ActivityLogs::RecordId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    Id,
    UserId,
    Action,
    TableName,
    RecordId,
    Timestamp,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
