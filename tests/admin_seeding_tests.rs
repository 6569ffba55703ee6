//! Integration tests for bootstrap admin seeding.

use anyhow::Result;
use prms::config::BootstrapAdmin;
use prms::crypto::verify_password;
use prms::models::{UserPermissions, UserRole};
use prms::repositories::UserRepository;
use prms::seeds::seed_default_admin;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{create_test_user, setup_test_db_arc};

fn admin() -> BootstrapAdmin {
    BootstrapAdmin {
        username: "admin".to_string(),
        email: "admin@prms.com".to_string(),
        password: "correct horse battery staple".to_string(),
    }
}

#[tokio::test]
async fn seeds_admin_into_empty_database() -> Result<()> {
    let db = setup_test_db_arc().await?;

    let created = seed_default_admin(&db, &admin())
        .await?
        .expect("admin created");
    assert_eq!(created.username, "admin");
    assert_eq!(created.role, UserRole::Admin);
    assert_eq!(UserPermissions::from(&created), UserPermissions::all());
    assert!(created.is_active);

    assert_ne!(created.password_hash, "correct horse battery staple");
    assert!(verify_password("correct horse battery staple", &created.password_hash)?);
    assert!(!verify_password("wrong", &created.password_hash)?);
    Ok(())
}

#[tokio::test]
async fn seeding_is_idempotent() -> Result<()> {
    let db = setup_test_db_arc().await?;

    assert!(seed_default_admin(&db, &admin()).await?.is_some());
    assert!(seed_default_admin(&db, &admin()).await?.is_none());

    let repo = UserRepository::new(db.clone());
    assert_eq!(repo.count().await?, 1);
    Ok(())
}

#[tokio::test]
async fn skips_when_any_user_exists() -> Result<()> {
    let db = setup_test_db_arc().await?;
    create_test_user(&db, "early-bird").await?;

    assert!(seed_default_admin(&db, &admin()).await?.is_none());

    let repo = UserRepository::new(db.clone());
    assert!(repo.find_by_username("admin").await?.is_none());
    Ok(())
}
