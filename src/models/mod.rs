//! # Data Models
//!
//! SeaORM entities for the seven tables of the rental records schema, plus
//! the currency helpers shared by every `NUMERIC(10, 2)` column.

pub mod activity_log;
pub mod expense;
pub mod money;
pub mod payment;
pub mod property;
pub mod tenant;
pub mod unit;
pub mod user;

pub use activity_log::Entity as ActivityLog;
pub use expense::{Entity as Expense, ExpenseCategory};
pub use payment::Entity as Payment;
pub use property::Entity as Property;
pub use tenant::{Entity as Tenant, TenantStatus};
pub use unit::Entity as Unit;
pub use user::{Entity as User, UserPermissions, UserRole};
