//! Migration to create the units table.
//!
//! Units belong to a property. Deleting a property that still owns units is
//! rejected by the RESTRICT foreign key.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Units::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Units::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Units::PropertyId).integer().not_null())
                    .col(ColumnDef::new(Units::UnitNumber).string_len(20).not_null())
                    .col(ColumnDef::new(Units::RentAmount).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Units::MaxTenants).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_units_property_id")
                            .from(Units::Table, Units::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_units_property_id")
                    .table(Units::Table)
                    .col(Units::PropertyId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Units::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Units {
    Table,
    Id,
    PropertyId,
    UnitNumber,
    RentAmount,
    MaxTenants,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
}
