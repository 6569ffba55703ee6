//! Integration tests for UserRepository.

use anyhow::Result;
use prms::error::RepositoryError;
use prms::models::{UserPermissions, UserRole};
use prms::repositories::{CreateUserRequest, UpdateUserRequest, UserRepository};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{create_fixture, execute_raw, setup_test_db_arc};

#[tokio::test]
async fn create_applies_column_defaults() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = UserRepository::new(db.clone());

    let user = repo
        .create(CreateUserRequest::new("wanjiru", "wanjiru@prms.test", "hash"))
        .await?;

    assert_eq!(user.role, UserRole::Employee);
    assert!(user.can_add_payments);
    assert!(user.can_add_expenses);
    assert!(user.can_add_tenants);
    assert!(!user.can_edit_records);
    assert!(!user.can_view_reports);
    assert!(user.is_active);
    Ok(())
}

#[tokio::test]
async fn raw_insert_uses_schema_defaults() -> Result<()> {
    let db = setup_test_db_arc().await?;
    execute_raw(
        &db,
        "INSERT INTO users (username, email, password_hash) VALUES ('raw', 'raw@prms.test', 'x')",
    )
    .await?;

    let repo = UserRepository::new(db.clone());
    let user = repo.find_by_username("raw").await?.expect("row exists");
    assert_eq!(user.role, UserRole::Employee);
    assert_eq!(UserPermissions::from(&user), UserPermissions::default());
    assert!(user.is_active);
    Ok(())
}

#[tokio::test]
async fn duplicate_username_is_rejected() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = UserRepository::new(db.clone());

    repo.create(CreateUserRequest::new("otieno", "otieno@prms.test", "hash"))
        .await?;
    let err = repo
        .create(CreateUserRequest::new("otieno", "other@prms.test", "hash"))
        .await
        .expect_err("second insert must fail");

    assert!(err.is_unique_violation(), "unexpected error: {err:?}");
    assert_eq!(repo.count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_rejected() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = UserRepository::new(db.clone());

    repo.create(CreateUserRequest::new("first", "shared@prms.test", "hash"))
        .await?;
    let err = repo
        .create(CreateUserRequest::new("second", "shared@prms.test", "hash"))
        .await
        .expect_err("second insert must fail");

    assert!(matches!(err, RepositoryError::UniqueViolation(_)));
    Ok(())
}

#[tokio::test]
async fn blank_and_oversized_fields_are_rejected() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = UserRepository::new(db.clone());

    let err = repo
        .create(CreateUserRequest::new("  ", "blank@prms.test", "hash"))
        .await
        .expect_err("blank username");
    assert!(matches!(err, RepositoryError::MissingField { field: "username" }));

    let err = repo
        .create(CreateUserRequest::new("a".repeat(51), "long@prms.test", "hash"))
        .await
        .expect_err("username wider than the column");
    assert!(matches!(err, RepositoryError::Validation(_)));

    assert_eq!(repo.count().await?, 0);
    Ok(())
}

#[tokio::test]
async fn invalid_role_in_storage_is_rejected() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let err = execute_raw(
        &db,
        "INSERT INTO users (username, email, password_hash, role) VALUES ('x', 'x@prms.test', 'x', 'OWNER')",
    )
    .await
    .expect_err("role outside the allowed set");

    assert!(matches!(
        RepositoryError::database_error(err),
        RepositoryError::CheckViolation(_)
    ));
    Ok(())
}

#[tokio::test]
async fn update_role_and_permissions() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = UserRepository::new(db.clone());
    let user = repo
        .create(CreateUserRequest::new("njeri", "njeri@prms.test", "hash"))
        .await?;

    let updated = repo
        .update(
            user.id,
            UpdateUserRequest {
                role: Some(UserRole::Admin),
                email: Some("njeri@example.com".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.role, UserRole::Admin);
    assert_eq!(updated.email, "njeri@example.com");
    assert_eq!(updated.username, "njeri");

    let updated = repo
        .update_permissions(user.id, UserPermissions::all())
        .await?;
    assert_eq!(UserPermissions::from(&updated), UserPermissions::all());

    let deactivated = repo.set_active(user.id, false).await?;
    assert!(!deactivated.is_active);

    let found = repo.find_by_email("njeri@example.com").await?;
    assert_eq!(found.map(|u| u.id), Some(user.id));
    Ok(())
}

#[tokio::test]
async fn update_missing_user_is_not_found() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = UserRepository::new(db.clone());

    let err = repo
        .update(42, UpdateUserRequest::default())
        .await
        .expect_err("no such user");
    assert!(matches!(err, RepositoryError::NotFound(_)));

    let err = repo.delete(42).await.expect_err("no such user");
    assert_eq!(err.to_string(), "user 42 not found");
    Ok(())
}

#[tokio::test]
async fn delete_user_with_payments_is_restricted() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let fixture = create_fixture(&db).await?;
    execute_raw(
        &db,
        &format!(
            "INSERT INTO payments (tenant_id, unit_id, amount, payment_date, payment_method, created_by, created_at) \
             VALUES ({}, {}, 100.00, '2026-02-01', 'cash', {}, '2026-02-01 09:00:00+00:00')",
            fixture.tenant.id, fixture.unit.id, fixture.user.id
        ),
    )
    .await?;

    let repo = UserRepository::new(db.clone());
    let err = repo
        .delete(fixture.user.id)
        .await
        .expect_err("payments still reference the user");
    assert!(err.is_foreign_key_violation(), "unexpected error: {err:?}");
    assert!(repo.get_by_id(fixture.user.id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn list_is_ordered_by_username() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let repo = UserRepository::new(db.clone());
    for name in ["zawadi", "akinyi", "mwangi"] {
        repo.create(CreateUserRequest::new(name, format!("{name}@prms.test"), "hash"))
            .await?;
    }

    let names: Vec<String> = repo.list().await?.into_iter().map(|u| u.username).collect();
    assert_eq!(names, vec!["akinyi", "mwangi", "zawadi"]);
    Ok(())
}
