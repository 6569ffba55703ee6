//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM operations
//! for the rental records schema. Each repository owns one table and shares the
//! connection pool through an `Arc<DatabaseConnection>`.

pub mod activity_log;
pub mod expense;
pub mod payment;
pub mod property;
pub mod tenant;
pub mod unit;
pub mod user;

pub use activity_log::{ActivityLogRepository, CreateActivityLogRequest};
pub use expense::{CreateExpenseRequest, ExpenseRepository, UpdateExpenseRequest};
pub use payment::{CreatePaymentRequest, PaymentRepository, UpdatePaymentRequest};
pub use property::{
    CascadeDeleteSummary, CreatePropertyRequest, PropertyRepository, UpdatePropertyRequest,
};
pub use tenant::{CreateTenantRequest, TenantRepository, UpdateTenantRequest};
pub use unit::{CreateUnitRequest, UnitRepository, UpdateUnitRequest};
pub use user::{CreateUserRequest, UpdateUserRequest, UserRepository};

use crate::error::RepositoryError;

/// Validate a required text column: non-blank and within the column width.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), RepositoryError> {
    if value.trim().is_empty() {
        return Err(RepositoryError::MissingField { field });
    }
    bounded_text(field, value, max_len)
}

/// SQLite ignores `VARCHAR(n)`, so widths are checked before every write.
pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    max_len: usize,
) -> Result<(), RepositoryError> {
    let len = value.chars().count();
    if len > max_len {
        return Err(RepositoryError::validation_error(format!(
            "{field} cannot exceed {max_len} characters (got {len})"
        )));
    }
    Ok(())
}
