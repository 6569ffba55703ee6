//! # PRMS Main Entry Point
//!
//! Operator CLI: run migrations, seed the bootstrap admin, check the
//! database connection.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use prms::{config::ConfigLoader, db, seeds::seed_default_admin, telemetry::init_tracing};

#[derive(Debug, Parser)]
#[command(name = "prms", version, about = "Property rental records database tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply or inspect schema migrations
    Migrate {
        #[command(subcommand)]
        action: Option<MigrateAction>,
    },
    /// Create the bootstrap admin from PRMS_ADMIN_* when no user exists
    SeedAdmin,
    /// Verify the database is reachable
    Check,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Revert the most recent migration
    Down,
    /// List applied and pending migrations
    Status,
    /// Drop every table and reapply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    init_tracing(&config)?;
    tracing::info!(profile = %config.profile, "configuration loaded");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "effective configuration");
    }

    let conn = db::init_pool(&config).await?;

    match cli.command {
        Command::Migrate { action } => match action.unwrap_or(MigrateAction::Up) {
            MigrateAction::Up => db::run_migrations(&conn).await?,
            MigrateAction::Down => Migrator::down(&conn, Some(1))
                .await
                .context("Failed to revert migration")?,
            MigrateAction::Status => Migrator::status(&conn)
                .await
                .context("Failed to read migration status")?,
            MigrateAction::Fresh => Migrator::fresh(&conn)
                .await
                .context("Failed to rebuild schema")?,
        },
        Command::SeedAdmin => {
            let admin = config.bootstrap_admin().context(
                "PRMS_ADMIN_USERNAME, PRMS_ADMIN_EMAIL and PRMS_ADMIN_PASSWORD must be set",
            )?;
            db::run_migrations(&conn).await?;
            match seed_default_admin(&conn, &admin).await? {
                Some(user) => println!("Created admin '{}' (id {})", user.username, user.id),
                None => println!("Users already exist; nothing to do"),
            }
        }
        Command::Check => {
            db::health_check(&conn).await?;
            println!("Database connection OK");
        }
    }

    Ok(())
}
