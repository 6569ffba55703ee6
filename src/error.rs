//! # Error Handling
//!
//! Error types for the repository layer. Every write that trips a schema
//! constraint surfaces as a dedicated variant so callers can tell a duplicate
//! username from a dangling foreign key without parsing driver messages.

use sea_orm::{DbErr, RuntimeErr, SqlErr};
use thiserror::Error;

/// Errors returned by every repository operation
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),
    #[error("not-null constraint violated: {0}")]
    NotNullViolation(String),
    #[error("check constraint violated: {0}")]
    CheckViolation(String),
    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },
    #[error("invalid value '{value}' for {field}")]
    InvalidEnumValue { field: &'static str, value: String },
    #[error("invalid {entity} transition from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Database(#[source] DbErr),
}

impl RepositoryError {
    /// Classify a SeaORM error into a constraint violation where possible.
    pub fn database_error(error: DbErr) -> Self {
        if let Some((constraint, message)) = classify_constraint(&error) {
            return match constraint {
                Constraint::Unique => RepositoryError::UniqueViolation(message),
                Constraint::ForeignKey => RepositoryError::ForeignKeyViolation(message),
                Constraint::NotNull => RepositoryError::NotNullViolation(message),
                Constraint::Check => RepositoryError::CheckViolation(message),
            };
        }

        match error {
            DbErr::RecordNotFound(message) => RepositoryError::NotFound(message),
            DbErr::RecordNotUpdated => {
                RepositoryError::NotFound("record to update was not found".to_string())
            }
            other => RepositoryError::Database(other),
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        RepositoryError::Validation(message.into())
    }

    pub fn invalid_enum(field: &'static str, value: &str) -> Self {
        RepositoryError::InvalidEnumValue {
            field,
            value: value.to_string(),
        }
    }

    pub fn not_found(entity: &str, id: i32) -> Self {
        RepositoryError::NotFound(format!("{entity} {id} not found"))
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RepositoryError::UniqueViolation(_))
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, RepositoryError::ForeignKeyViolation(_))
    }

    /// True for every error raised by a schema constraint or its Rust-side equivalent.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            RepositoryError::UniqueViolation(_)
                | RepositoryError::ForeignKeyViolation(_)
                | RepositoryError::NotNullViolation(_)
                | RepositoryError::CheckViolation(_)
                | RepositoryError::MissingField { .. }
                | RepositoryError::InvalidEnumValue { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

const PG_UNIQUE: &str = "23505";
const PG_FOREIGN_KEY: &str = "23503";
const PG_NOT_NULL: &str = "23502";
const PG_CHECK: &str = "23514";

// SQLite extended result codes
const SQLITE_UNIQUE_CODES: &[&str] = &["1555", "2067"];
// 787 on insert/update, 1811 when an ON DELETE RESTRICT action fires
const SQLITE_FOREIGN_KEY_CODES: &[&str] = &["787", "1811"];
const SQLITE_NOT_NULL: &str = "1299";
const SQLITE_CHECK: &str = "275";

fn classify_constraint(error: &DbErr) -> Option<(Constraint, String)> {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => {
            return Some((Constraint::Unique, message));
        }
        Some(SqlErr::ForeignKeyConstraintViolation(message)) => {
            return Some((Constraint::ForeignKey, message));
        }
        _ => {}
    }

    let sqlx_err = match error {
        DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return None,
    };

    let db_error = sqlx_err.as_database_error()?;
    let message = db_error.message().to_string();

    if db_error.is_unique_violation() {
        return Some((Constraint::Unique, message));
    }
    if db_error.is_foreign_key_violation() {
        return Some((Constraint::ForeignKey, message));
    }
    if db_error.is_check_violation() {
        return Some((Constraint::Check, message));
    }

    let code = db_error.code()?;
    let constraint = match &*code {
        PG_UNIQUE => Constraint::Unique,
        code if SQLITE_UNIQUE_CODES.contains(&code) => Constraint::Unique,
        PG_FOREIGN_KEY => Constraint::ForeignKey,
        code if SQLITE_FOREIGN_KEY_CODES.contains(&code) => Constraint::ForeignKey,
        PG_NOT_NULL | SQLITE_NOT_NULL => Constraint::NotNull,
        PG_CHECK | SQLITE_CHECK => Constraint::Check,
        _ => return None,
    };

    Some((constraint, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_driver_errors_are_wrapped() {
        let err = RepositoryError::database_error(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, RepositoryError::Database(DbErr::Custom(_))));
        assert!(!err.is_constraint_violation());
    }

    #[test]
    fn test_record_not_updated_maps_to_not_found() {
        let err = RepositoryError::database_error(DbErr::RecordNotUpdated);
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RepositoryError::invalid_enum("category", "rent").to_string(),
            "invalid value 'rent' for category"
        );
        assert_eq!(
            RepositoryError::MissingField { field: "username" }.to_string(),
            "required field 'username' is missing"
        );
        assert_eq!(
            RepositoryError::not_found("tenant", 7).to_string(),
            "tenant 7 not found"
        );
    }

    #[test]
    fn test_constraint_predicates() {
        assert!(RepositoryError::UniqueViolation("users.email".into()).is_unique_violation());
        assert!(
            RepositoryError::ForeignKeyViolation("units.property_id".into())
                .is_foreign_key_violation()
        );
        assert!(RepositoryError::invalid_enum("role", "OWNER").is_constraint_violation());
        assert!(!RepositoryError::validation_error("too long").is_constraint_violation());
    }
}
