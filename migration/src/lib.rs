//! Database migrations for the property rental records schema.
//!
//! Tables are created in foreign-key dependency order; the migrator reverts
//! them in reverse.

pub use sea_orm_migration::prelude::*;

mod m2026_10_01_000001_create_users;
mod m2026_10_01_000002_create_properties;
mod m2026_10_01_000003_create_units;
mod m2026_10_01_000004_create_tenants;
mod m2026_10_01_000005_create_payments;
mod m2026_10_01_000006_create_expenses;
mod m2026_10_01_000007_create_activity_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_10_01_000001_create_users::Migration),
            Box::new(m2026_10_01_000002_create_properties::Migration),
            Box::new(m2026_10_01_000003_create_units::Migration),
            Box::new(m2026_10_01_000004_create_tenants::Migration),
            Box::new(m2026_10_01_000005_create_payments::Migration),
            Box::new(m2026_10_01_000006_create_expenses::Migration),
            Box::new(m2026_10_01_000007_create_activity_logs::Migration),
        ]
    }
}
