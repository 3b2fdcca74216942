//! # Demo Catalog
//!
//! The bicycle catalog used by the `seed` binary and the SQLite tests.
//!
//! One product, six part types (bell optional), fifteen options including a
//! retired frame, three incompatibility rules (one inactive), three pricing
//! rules (one inactive) and stock for all but the 8-speed chain.

use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;

/// SQL inserts for the demo catalog.
pub const DEMO_CATALOG_SQL: &str = include_str!("../fixtures/demo_catalog.sql");

/// Product id of the demo bicycle.
pub const DEMO_PRODUCT_ID: i64 = 1;

/// Loads the demo catalog in one transaction.
///
/// Fails with `DbError::UniqueViolation` if it is already loaded.
pub async fn load_demo_catalog(db: &Database) -> DbResult<()> {
    let mut tx = db.pool().begin().await?;
    sqlx::raw_sql(DEMO_CATALOG_SQL).execute(&mut *tx).await?;
    tx.commit().await?;

    info!(product_id = DEMO_PRODUCT_ID, "Demo catalog loaded");
    Ok(())
}

/// Whether any product exists yet.
pub async fn catalog_is_empty(db: &Database) -> DbResult<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(db.pool())
        .await?;
    Ok(count == 0)
}

/// Fresh in-memory database with the demo catalog.
#[cfg(test)]
pub(crate) async fn demo_database() -> Database {
    let db = Database::new(crate::config::DbConfig::in_memory())
        .await
        .expect("in-memory database");
    load_demo_catalog(&db).await.expect("demo catalog");
    db
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DbConfig;
    use crate::error::DbError;

    #[tokio::test]
    async fn test_load_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(catalog_is_empty(&db).await.unwrap());

        load_demo_catalog(&db).await.unwrap();
        assert!(!catalog_is_empty(&db).await.unwrap());

        assert!(matches!(
            load_demo_catalog(&db).await,
            Err(DbError::UniqueViolation { .. })
        ));
    }
}
