//! # PRMS Library
//!
//! Persistence layer for a property rental management system: SeaORM
//! entities, migrations, repositories and the configuration, logging and
//! connection plumbing around them.

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod models;
pub mod repositories;
pub mod seeds;
pub mod telemetry;
pub use migration;
