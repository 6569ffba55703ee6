//! Bootstrap admin seeding
//!
//! Creates the first ADMIN account on an empty users table so an operator
//! can log in and create everyone else.

use anyhow::{Context, Result};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::BootstrapAdmin;
use crate::crypto::hash_password;
use crate::models::user::{self, UserPermissions, UserRole};
use crate::repositories::{CreateUserRequest, UserRepository};

/// Seeds the bootstrap admin account
///
/// Does nothing when any user already exists, so it is safe to run on every
/// deploy.
///
/// # Arguments
///
/// * `db` - Database connection
/// * `admin` - Credentials taken from `PRMS_ADMIN_*`
///
/// # Returns
///
/// Returns the created admin, or `None` if the users table was not empty
pub async fn seed_default_admin(
    db: &DatabaseConnection,
    admin: &BootstrapAdmin,
) -> Result<Option<user::Model>> {
    let repo = UserRepository::new(Arc::new(db.clone()));

    let existing = repo.count().await.context("Failed to count users")?;
    if existing > 0 {
        log::info!("{} user(s) already exist, skipping admin seeding", existing);
        return Ok(None);
    }

    let password_hash =
        hash_password(&admin.password).context("Failed to hash bootstrap admin password")?;

    let request = CreateUserRequest {
        role: UserRole::Admin,
        permissions: UserPermissions::all(),
        ..CreateUserRequest::new(admin.username.clone(), admin.email.clone(), password_hash)
    };

    match repo.create(request).await {
        Ok(user) => {
            log::info!("Created bootstrap admin '{}' (id {})", user.username, user.id);
            Ok(Some(user))
        }
        Err(e) => {
            log::error!("Failed to create bootstrap admin '{}': {}", admin.username, e);
            Err(e.into())
        }
    }
}
