//! # Database Migrations
//!
//! Embedded SQL migrations for the configurator schema.
//!
//! ## Schema
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  001_catalog.sql                                                        │
//! │    products ──< product_part_types >── part_types ──< part_options      │
//! │    incompatibility_rules ──< incompatibility_pairs (from, to)           │
//! │    pricing_rules ──< pricing_rule_conditions (option_id)                │
//! │                                                                         │
//! │  002_inventory.sql                                                      │
//! │    inventory (option_id, quantity >= 0, expected_restock_date)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql`
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent; each migration runs in its own transaction, in filename order.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)` for health checks.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, usize::try_from(applied).unwrap_or(0)))
}
