//! Database seeding functionality
//!
//! This module provides functionality to seed the database with initial data
//! that has to exist before anyone can log in.

pub mod admin;

pub use admin::seed_default_admin;
