//! Migration to create the tenants table.
//!
//! Tenant email is unique and status is restricted to `active`/`left`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tenants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tenants::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tenants::FullName).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Tenants::Email)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Tenants::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Tenants::IdNumber).string_len(50).not_null())
                    .col(ColumnDef::new(Tenants::MoveInDate).date().not_null())
                    .col(ColumnDef::new(Tenants::UnitId).integer().not_null())
                    .col(
                        ColumnDef::new(Tenants::Status)
                            .string_len(16)
                            .not_null()
                            .default("active")
                            .check(Expr::col(Tenants::Status).is_in(["active", "left"])),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tenants_unit_id")
                            .from(Tenants::Table, Tenants::UnitId)
                            .to(Units::Table, Units::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tenants_unit_id")
                    .table(Tenants::Table)
                    .col(Tenants::UnitId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tenants::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tenants {
    Table,
    Id,
    FullName,
    Email,
    Phone,
    IdNumber,
    MoveInDate,
    UnitId,
    Status,
}

#[derive(DeriveIden)]
enum Units {
    Table,
    Id,
}
