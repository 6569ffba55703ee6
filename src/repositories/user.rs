//! # User Repository
//!
//! CRUD operations for staff accounts, including role and permission
//! management.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;

use super::required_text;
use crate::error::RepositoryError;
use crate::models::user::{self, Entity as User, UserPermissions, UserRole};

const USERNAME_MAX: usize = 50;
const EMAIL_MAX: usize = 100;
const PASSWORD_HASH_MAX: usize = 255;

/// Request data for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// Already-hashed password (see `crypto::hash_password`)
    pub password_hash: String,
    pub role: UserRole,
    pub permissions: UserPermissions,
    pub is_active: bool,
}

impl CreateUserRequest {
    /// An active employee with the default permission set.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            role: UserRole::default(),
            permissions: UserPermissions::default(),
            is_active: true,
        }
    }
}

/// Fields that may be changed on an existing user. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

/// Repository for User database operations
#[derive(Debug, Clone)]
pub struct UserRepository {
    /// Database connection pool
    pub db: Arc<DatabaseConnection>,
}

impl UserRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Creates a new user
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` when the username or email is already taken,
    /// `MissingField` for blank required fields.
    pub async fn create(&self, request: CreateUserRequest) -> Result<user::Model, RepositoryError> {
        required_text("username", &request.username, USERNAME_MAX)?;
        required_text("email", &request.email, EMAIL_MAX)?;
        required_text("password_hash", &request.password_hash, PASSWORD_HASH_MAX)?;

        let mut active = user::ActiveModel {
            username: Set(request.username),
            email: Set(request.email),
            password_hash: Set(request.password_hash),
            role: Set(request.role),
            is_active: Set(request.is_active),
            ..Default::default()
        };
        request.permissions.apply(&mut active);

        let user = active
            .insert(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(user_id = user.id, role = %user.role, "user created");
        Ok(user)
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<user::Model>, RepositoryError> {
        User::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, RepositoryError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, RepositoryError> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// List all users ordered by username
    pub async fn list(&self) -> Result<Vec<user::Model>, RepositoryError> {
        User::find()
            .order_by_asc(user::Column::Username)
            .all(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    /// Update account details
    pub async fn update(
        &self,
        id: i32,
        request: UpdateUserRequest,
    ) -> Result<user::Model, RepositoryError> {
        let user = self.require(id).await?;
        let mut active = user.into_active_model();

        if let Some(username) = request.username {
            required_text("username", &username, USERNAME_MAX)?;
            active.username = Set(username);
        }
        if let Some(email) = request.email {
            required_text("email", &email, EMAIL_MAX)?;
            active.email = Set(email);
        }
        if let Some(password_hash) = request.password_hash {
            required_text("password_hash", &password_hash, PASSWORD_HASH_MAX)?;
            active.password_hash = Set(password_hash);
        }
        if let Some(role) = request.role {
            active.role = Set(role);
        }

        let user = active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(user_id = user.id, "user updated");
        Ok(user)
    }

    /// Replace all five permission flags at once
    pub async fn update_permissions(
        &self,
        id: i32,
        permissions: UserPermissions,
    ) -> Result<user::Model, RepositoryError> {
        let user = self.require(id).await?;
        let mut active = user.into_active_model();
        permissions.apply(&mut active);

        let user = active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(
            user_id = user.id,
            can_edit_records = user.can_edit_records,
            can_view_reports = user.can_view_reports,
            "user permissions updated"
        );
        Ok(user)
    }

    /// Activate or deactivate an account
    pub async fn set_active(&self, id: i32, is_active: bool) -> Result<user::Model, RepositoryError> {
        let user = self.require(id).await?;
        let mut active = user.into_active_model();
        active.is_active = Set(is_active);

        let user = active
            .update(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        tracing::info!(user_id = user.id, is_active, "user activation changed");
        Ok(user)
    }

    /// Delete a user
    ///
    /// Fails with `ForeignKeyViolation` while payments, expenses or activity
    /// logs still reference the account; deactivate it instead.
    pub async fn delete(&self, id: i32) -> Result<(), RepositoryError> {
        let result = User::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::not_found("user", id));
        }

        tracing::info!(user_id = id, "user deleted");
        Ok(())
    }

    /// Get user count
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        User::find()
            .count(&*self.db)
            .await
            .map_err(RepositoryError::database_error)
    }

    async fn require(&self, id: i32) -> Result<user::Model, RepositoryError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| RepositoryError::not_found("user", id))
    }
}
