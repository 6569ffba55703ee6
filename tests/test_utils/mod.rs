//! Test utilities for database testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations applied, plus fixtures for the rows most tests need.

use anyhow::Result;
use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use prms::models::{property, tenant, unit, user};
use prms::repositories::{
    CreatePropertyRequest, CreateTenantRequest, CreateUnitRequest, CreateUserRequest,
    PropertyRepository, TenantRepository, UnitRepository, UserRepository,
};
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use std::str::FromStr;
use std::sync::Arc;

/// Sets up an in-memory SQLite database with all migrations applied.
///
/// # Returns
///
/// Returns a Result containing the database connection
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    // Create in-memory SQLite database
    let db = Database::connect("sqlite::memory:").await?;

    // Run all migrations
    Migrator::up(&db, None).await?;

    // Every RESTRICT rule under test depends on this
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON".to_string(),
    ))
    .await?;

    Ok(db)
}

/// Sets up an in-memory SQLite database with all migrations applied and returns an Arc.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// Executes raw SQL, bypassing the repositories and the Rust enums.
#[allow(dead_code)]
pub async fn execute_raw(db: &DatabaseConnection, sql: &str) -> Result<(), sea_orm::DbErr> {
    db.execute(Statement::from_string(db.get_database_backend(), sql.to_string()))
        .await
        .map(|_| ())
}

#[allow(dead_code)]
pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

#[allow(dead_code)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Creates an employee with default permissions.
#[allow(dead_code)]
pub async fn create_test_user(db: &Arc<DatabaseConnection>, username: &str) -> Result<user::Model> {
    let repo = UserRepository::new(db.clone());
    let user = repo
        .create(CreateUserRequest::new(
            username,
            format!("{username}@prms.test"),
            "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA",
        ))
        .await?;
    Ok(user)
}

#[allow(dead_code)]
pub async fn create_test_property(
    db: &Arc<DatabaseConnection>,
    name: &str,
) -> Result<property::Model> {
    let repo = PropertyRepository::new(db.clone());
    let property = repo
        .create(CreatePropertyRequest {
            name: name.to_string(),
            location: "12 Harbour Road".to_string(),
            property_type: "apartment".to_string(),
        })
        .await?;
    Ok(property)
}

#[allow(dead_code)]
pub async fn create_test_unit(
    db: &Arc<DatabaseConnection>,
    property_id: i32,
    unit_number: &str,
) -> Result<unit::Model> {
    let repo = UnitRepository::new(db.clone());
    let unit = repo
        .create(CreateUnitRequest {
            property_id,
            unit_number: unit_number.to_string(),
            rent_amount: dec("1200"),
            max_tenants: Some(2),
        })
        .await?;
    Ok(unit)
}

#[allow(dead_code)]
pub async fn create_test_tenant(
    db: &Arc<DatabaseConnection>,
    unit_id: i32,
    email: &str,
) -> Result<tenant::Model> {
    let repo = TenantRepository::new(db.clone());
    let tenant = repo
        .create(CreateTenantRequest {
            full_name: "Amina Otieno".to_string(),
            email: email.to_string(),
            phone: "+254700000001".to_string(),
            id_number: "29384756".to_string(),
            move_in_date: date(2026, 1, 1),
            unit_id,
        })
        .await?;
    Ok(tenant)
}

/// A property with one unit and one active tenant, plus a user to record things.
#[allow(dead_code)]
pub struct Fixture {
    pub user: user::Model,
    pub property: property::Model,
    pub unit: unit::Model,
    pub tenant: tenant::Model,
}

#[allow(dead_code)]
pub async fn create_fixture(db: &Arc<DatabaseConnection>) -> Result<Fixture> {
    let user = create_test_user(db, "clerk").await?;
    let property = create_test_property(db, "Harbour View").await?;
    let unit = create_test_unit(db, property.id, "A1").await?;
    let tenant = create_test_tenant(db, unit.id, "amina@example.com").await?;
    Ok(Fixture {
        user,
        property,
        unit,
        tenant,
    })
}
