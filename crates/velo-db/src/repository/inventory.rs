//! # Inventory Repository
//!
//! Stock reads for the engine and conditional writes for checkout.
//!
//! ## Decrement Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Last-Unit Race                                   │
//! │                                                                     │
//! │  ❌ WRONG: read, check, then write                                 │
//! │     SELECT quantity ...        (both checkouts see 1)              │
//! │     UPDATE SET quantity = 0    (both succeed → oversold)           │
//! │                                                                     │
//! │  ✅ CORRECT: one conditional statement                             │
//! │     UPDATE inventory SET quantity = quantity - ?1                  │
//! │     WHERE option_id = ?2 AND quantity >= ?1                        │
//! │     rows_affected = 1 → Applied, 0 → Insufficient                  │
//! │                                                                     │
//! │  A whole cart goes through decrement_all: every line in one        │
//! │  transaction, rolled back if any line is short.                    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info, warn};

use velo_core::store::InventoryStore;
use velo_core::validation::validate_quantity;
use velo_core::{CoreResult, DecrementOutcome, InventoryRecord, OptionId, ValidationError};

use crate::error::DbResult;
use crate::repository::catalog::push_id_list;

/// Repository for inventory operations.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    /// Creates a new InventoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InventoryRepository { pool }
    }

    /// Gets the stock records for `ids`. Options without a row are omitted.
    pub async fn get_records(&self, ids: &[OptionId]) -> DbResult<Vec<InventoryRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT option_id, quantity, expected_restock_date FROM inventory WHERE option_id IN ",
        );
        push_id_list(&mut builder, ids);
        builder.push(" ORDER BY option_id");

        let records = builder
            .build_query_as::<InventoryRecord>()
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    /// Reduces stock by `quantity` if enough units remain.
    pub async fn decrement_one(
        &self,
        option_id: OptionId,
        quantity: i64,
    ) -> DbResult<DecrementOutcome> {
        validate_quantity(quantity)?;
        debug!(option_id, quantity, "Decrementing stock");

        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET quantity = quantity - ?1
            WHERE option_id = ?2 AND quantity >= ?1
            "#,
        )
        .bind(quantity)
        .bind(option_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(option_id, quantity, "Insufficient stock");
            return Ok(DecrementOutcome::Insufficient { option_id });
        }

        Ok(DecrementOutcome::Applied)
    }

    /// Reserves every `(option_id, quantity)` line or none of them.
    ///
    /// ## Returns
    /// * `Ok(Applied)` - all lines committed
    /// * `Ok(Insufficient { option_id })` - first short line; nothing changed
    pub async fn decrement_all(&self, lines: &[(OptionId, i64)]) -> DbResult<DecrementOutcome> {
        for &(_, quantity) in lines {
            validate_quantity(quantity)?;
        }

        let mut tx = self.pool.begin().await?;

        for &(option_id, quantity) in lines {
            let result = sqlx::query(
                r#"
                UPDATE inventory
                SET quantity = quantity - ?1
                WHERE option_id = ?2 AND quantity >= ?1
                "#,
            )
            .bind(quantity)
            .bind(option_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                tx.rollback().await?;
                warn!(option_id, quantity, "Reservation rolled back: insufficient stock");
                return Ok(DecrementOutcome::Insufficient { option_id });
            }
        }

        tx.commit().await?;
        info!(lines = lines.len(), "Reservation committed");
        Ok(DecrementOutcome::Applied)
    }

    /// Adds `quantity` units and sets the expected restock date.
    ///
    /// Creates the record if the option had none. `quantity` may be zero to
    /// only announce a restock date.
    pub async fn restock(
        &self,
        option_id: OptionId,
        quantity: i64,
        expected_restock: Option<NaiveDate>,
    ) -> DbResult<InventoryRecord> {
        if quantity < 0 {
            return Err(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }
        debug!(option_id, quantity, ?expected_restock, "Restocking");

        let record = sqlx::query_as::<_, InventoryRecord>(
            r#"
            INSERT INTO inventory (option_id, quantity, expected_restock_date)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (option_id) DO UPDATE SET
                quantity = quantity + excluded.quantity,
                expected_restock_date = excluded.expected_restock_date
            RETURNING option_id, quantity, expected_restock_date
            "#,
        )
        .bind(option_id)
        .bind(quantity)
        .bind(expected_restock)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    async fn records(&self, option_ids: &[OptionId]) -> CoreResult<Vec<InventoryRecord>> {
        Ok(self.get_records(option_ids).await?)
    }

    async fn decrement(&self, option_id: OptionId, quantity: i64) -> CoreResult<DecrementOutcome> {
        Ok(self.decrement_one(option_id, quantity).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
