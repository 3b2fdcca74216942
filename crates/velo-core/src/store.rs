//! # Store Traits
//!
//! The engine's view of the catalog and inventory collaborators.
//!
//! ## Contracts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConfigurationEngine<C, I>                                              │
//! │       │                                                                 │
//! │       ├──► C: CatalogStore    (read-only)                               │
//! │       │      product, part types, options, edges, pricing rules         │
//! │       │                                                                 │
//! │       └──► I: InventoryStore  (read; decrement for checkout callers)    │
//! │                                                                         │
//! │  Implementations:                                                       │
//! │  • velo_db::CatalogRepository / InventoryRepository (SQLite)            │
//! │  • velo_core::memory::InMemoryStore (tests, demos)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Batch lookups take id slices; implementations bind them as parameters.
//! Store failures surface as [`CoreError::DataAccess`](crate::error::CoreError).

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::CoreResult;
use crate::types::{
    DecrementOutcome, IncompatibilityEdge, InventoryRecord, OptionId, PartOption, PartType,
    PartTypeId, PricingRule, Product, ProductId,
};

/// Read-only catalog access.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Product with its part types in display order.
    async fn product(&self, product_id: ProductId) -> CoreResult<Option<Product>>;

    /// Every part type on the product, in display order.
    async fn part_types(&self, product_id: ProductId) -> CoreResult<Vec<PartType>>;

    /// Part types on the product flagged `required`, in display order.
    async fn required_part_types(&self, product_id: ProductId) -> CoreResult<Vec<PartType>>;

    /// Active options of one part type, ascending id.
    async fn options_for_part_type(&self, part_type_id: PartTypeId) -> CoreResult<Vec<PartOption>>;

    /// Active options among `option_ids`. Unknown or inactive ids are omitted.
    async fn options(&self, option_ids: &[OptionId]) -> CoreResult<Vec<PartOption>>;

    /// Edges of active incompatibility rules touching any of `option_ids`,
    /// on either end.
    async fn incompatibility_edges(
        &self,
        option_ids: &[OptionId],
    ) -> CoreResult<Vec<IncompatibilityEdge>>;

    /// Active pricing rules whose whole condition set is within `option_ids`.
    async fn pricing_rules(&self, option_ids: &[OptionId]) -> CoreResult<Vec<PricingRule>>;
}

/// Stock access.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Records for the given options. Options without a record are omitted.
    async fn records(&self, option_ids: &[OptionId]) -> CoreResult<Vec<InventoryRecord>>;

    /// Reduces stock only if at least `quantity` units remain.
    ///
    /// Used by checkout after validation, never by the engine itself. Two
    /// concurrent calls for the last unit must not both return `Applied`.
    async fn decrement(&self, option_id: OptionId, quantity: i64) -> CoreResult<DecrementOutcome>;
}

#[async_trait]
impl<T: CatalogStore + ?Sized> CatalogStore for Arc<T> {
    async fn product(&self, product_id: ProductId) -> CoreResult<Option<Product>> {
        (**self).product(product_id).await
    }

    async fn part_types(&self, product_id: ProductId) -> CoreResult<Vec<PartType>> {
        (**self).part_types(product_id).await
    }

    async fn required_part_types(&self, product_id: ProductId) -> CoreResult<Vec<PartType>> {
        (**self).required_part_types(product_id).await
    }

    async fn options_for_part_type(&self, part_type_id: PartTypeId) -> CoreResult<Vec<PartOption>> {
        (**self).options_for_part_type(part_type_id).await
    }

    async fn options(&self, option_ids: &[OptionId]) -> CoreResult<Vec<PartOption>> {
        (**self).options(option_ids).await
    }

    async fn incompatibility_edges(
        &self,
        option_ids: &[OptionId],
    ) -> CoreResult<Vec<IncompatibilityEdge>> {
        (**self).incompatibility_edges(option_ids).await
    }

    async fn pricing_rules(&self, option_ids: &[OptionId]) -> CoreResult<Vec<PricingRule>> {
        (**self).pricing_rules(option_ids).await
    }
}

#[async_trait]
impl<T: InventoryStore + ?Sized> InventoryStore for Arc<T> {
    async fn records(&self, option_ids: &[OptionId]) -> CoreResult<Vec<InventoryRecord>> {
        (**self).records(option_ids).await
    }

    async fn decrement(&self, option_id: OptionId, quantity: i64) -> CoreResult<DecrementOutcome> {
        (**self).decrement(option_id, quantity).await
    }
}
