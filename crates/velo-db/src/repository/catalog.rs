//! # Catalog Repository
//!
//! Read-only catalog queries backing [`CatalogStore`].
//!
//! ## Variable-Length ID Lists
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ❌ WRONG: splice ids into the SQL text                                │
//! │     format!("... WHERE id IN ({})", ids.join(","))                     │
//! │                                                                         │
//! │  ✅ CORRECT: one placeholder per id, values bound                      │
//! │     QueryBuilder: "... WHERE id IN (" ?, ?, ? ")" + push_bind(id)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use velo_core::store::CatalogStore;
use velo_core::{
    Adjustment, CoreResult, IncompatibilityEdge, Money, OptionId, PartOption, PartType,
    PartTypeId, Percentage, PricingRule, Product, ProductId, RuleId,
};

use crate::error::{DbError, DbResult};

/// Appends `(?, ?, ...)` with every id bound.
pub(crate) fn push_id_list(builder: &mut QueryBuilder<'_, Sqlite>, ids: &[i64]) {
    builder.push("(");
    let mut separated = builder.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    base_price_cents: i64,
}

#[derive(Debug, FromRow)]
struct PricingRuleRow {
    id: RuleId,
    adjustment_kind: String,
    adjustment_value: i64,
    is_active: bool,
}

impl PricingRuleRow {
    fn into_rule(self, conditions: BTreeSet<OptionId>) -> DbResult<PricingRule> {
        let adjustment = match self.adjustment_kind.as_str() {
            "fixed" => Adjustment::Fixed(Money::from_cents(self.adjustment_value)),
            "percentage" => {
                let bps = i32::try_from(self.adjustment_value).map_err(|_| DbError::InvalidRow {
                    table: "pricing_rules",
                    id: self.id,
                    message: format!("percentage {} bps out of range", self.adjustment_value),
                })?;
                Adjustment::Percentage(Percentage::from_bps(bps))
            }
            other => {
                return Err(DbError::InvalidRow {
                    table: "pricing_rules",
                    id: self.id,
                    message: format!("unknown adjustment kind '{other}'"),
                })
            }
        };

        Ok(PricingRule {
            id: self.id,
            adjustment,
            condition_option_ids: conditions,
            is_active: self.is_active,
        })
    }
}

/// Repository for catalog reads.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CatalogRepository::new(pool);
/// let frames = repo.list_active_options(FRAME).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    /// Gets a product with its part type ids in display order.
    pub async fn get_product(&self, product_id: ProductId) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, base_price_cents FROM products WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let part_type_ids: Vec<PartTypeId> = sqlx::query_scalar(
            r#"
            SELECT part_type_id
            FROM product_part_types
            WHERE product_id = ?1
            ORDER BY position, part_type_id
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(Product {
            id: row.id,
            name: row.name,
            base_price_cents: row.base_price_cents,
            part_type_ids,
        }))
    }

    /// Lists a product's part types in display order.
    pub async fn list_part_types(
        &self,
        product_id: ProductId,
        required_only: bool,
    ) -> DbResult<Vec<PartType>> {
        let part_types = sqlx::query_as::<_, PartType>(
            r#"
            SELECT pt.id, pt.name, pt.required
            FROM part_types pt
            INNER JOIN product_part_types ppt ON ppt.part_type_id = pt.id
            WHERE ppt.product_id = ?1
              AND (?2 = 0 OR pt.required = 1)
            ORDER BY ppt.position, pt.id
            "#,
        )
        .bind(product_id)
        .bind(required_only)
        .fetch_all(&self.pool)
        .await?;

        Ok(part_types)
    }

    /// Lists active options of one part type, ascending id.
    pub async fn list_active_options(&self, part_type_id: PartTypeId) -> DbResult<Vec<PartOption>> {
        let options = sqlx::query_as::<_, PartOption>(
            r#"
            SELECT id, part_type_id, name, base_price_cents, is_active
            FROM part_options
            WHERE part_type_id = ?1 AND is_active = 1
            ORDER BY id
            "#,
        )
        .bind(part_type_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    /// Gets the active options among `ids`.
    pub async fn get_options(&self, ids: &[OptionId]) -> DbResult<Vec<PartOption>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT id, part_type_id, name, base_price_cents, is_active \
             FROM part_options WHERE is_active = 1 AND id IN ",
        );
        push_id_list(&mut builder, ids);
        builder.push(" ORDER BY id");

        let options = builder
            .build_query_as::<PartOption>()
            .fetch_all(&self.pool)
            .await?;

        Ok(options)
    }

    /// Lists edges of active incompatibility rules with either end in `ids`.
    pub async fn list_edges(&self, ids: &[OptionId]) -> DbResult<Vec<IncompatibilityEdge>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT p.rule_id, p.from_option_id, p.to_option_id \
             FROM incompatibility_pairs p \
             INNER JOIN incompatibility_rules r ON r.id = p.rule_id \
             WHERE r.is_active = 1 AND (p.from_option_id IN ",
        );
        push_id_list(&mut builder, ids);
        builder.push(" OR p.to_option_id IN ");
        push_id_list(&mut builder, ids);
        builder.push(") ORDER BY p.rule_id, p.from_option_id, p.to_option_id");

        let edges = builder
            .build_query_as::<IncompatibilityEdge>()
            .fetch_all(&self.pool)
            .await?;

        debug!(ids = ids.len(), edges = edges.len(), "Loaded incompatibility edges");
        Ok(edges)
    }

    /// Lists active pricing rules whose whole, non-empty condition set is
    /// within `ids`, ascending rule id.
    pub async fn list_pricing_rules(&self, ids: &[OptionId]) -> DbResult<Vec<PricingRule>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT r.id, r.adjustment_kind, r.adjustment_value, r.is_active \
             FROM pricing_rules r \
             WHERE r.is_active = 1 \
               AND EXISTS (SELECT 1 FROM pricing_rule_conditions c WHERE c.rule_id = r.id) \
               AND NOT EXISTS ( \
                   SELECT 1 FROM pricing_rule_conditions c \
                   WHERE c.rule_id = r.id AND c.option_id NOT IN ",
        );
        push_id_list(&mut builder, ids);
        builder.push(") ORDER BY r.id");

        let rows = builder
            .build_query_as::<PricingRuleRow>()
            .fetch_all(&self.pool)
            .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let rule_ids: Vec<RuleId> = rows.iter().map(|r| r.id).collect();
        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT rule_id, option_id FROM pricing_rule_conditions WHERE rule_id IN ",
        );
        push_id_list(&mut builder, &rule_ids);

        let condition_rows = builder
            .build_query_as::<(RuleId, OptionId)>()
            .fetch_all(&self.pool)
            .await?;

        let mut conditions: BTreeMap<RuleId, BTreeSet<OptionId>> = BTreeMap::new();
        for (rule_id, option_id) in condition_rows {
            conditions.entry(rule_id).or_default().insert(option_id);
        }

        let rules = rows
            .into_iter()
            .map(|row| {
                let set = conditions.remove(&row.id).unwrap_or_default();
                row.into_rule(set)
            })
            .collect::<DbResult<Vec<_>>>()?;

        debug!(ids = ids.len(), rules = rules.len(), "Loaded pricing rules");
        Ok(rules)
    }
}

#[async_trait]
impl CatalogStore for CatalogRepository {
    async fn product(&self, product_id: ProductId) -> CoreResult<Option<Product>> {
        Ok(self.get_product(product_id).await?)
    }

    async fn part_types(&self, product_id: ProductId) -> CoreResult<Vec<PartType>> {
        Ok(self.list_part_types(product_id, false).await?)
    }

    async fn required_part_types(&self, product_id: ProductId) -> CoreResult<Vec<PartType>> {
        Ok(self.list_part_types(product_id, true).await?)
    }

    async fn options_for_part_type(&self, part_type_id: PartTypeId) -> CoreResult<Vec<PartOption>> {
        Ok(self.list_active_options(part_type_id).await?)
    }

    async fn options(&self, option_ids: &[OptionId]) -> CoreResult<Vec<PartOption>> {
        Ok(self.get_options(option_ids).await?)
    }

    async fn incompatibility_edges(
        &self,
        option_ids: &[OptionId],
    ) -> CoreResult<Vec<IncompatibilityEdge>> {
        Ok(self.list_edges(option_ids).await?)
    }

    async fn pricing_rules(&self, option_ids: &[OptionId]) -> CoreResult<Vec<PricingRule>> {
        Ok(self.list_pricing_rules(option_ids).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
