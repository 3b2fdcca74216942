//! # In-Memory Store
//!
//! A [`CatalogStore`] + [`InventoryStore`] backed by plain collections.
//!
//! Used by the engine's tests and by callers that want to exercise the
//! engine without a database. Inventory sits behind an `RwLock` so the
//! conditional decrement holds the same guarantee as the SQLite store:
//! two decrements of the last unit cannot both succeed.
//!
//! ## Usage
//! ```rust
//! use velo_core::memory::InMemoryStore;
//! use velo_core::types::{PartOption, PartType, Product};
//!
//! let store = InMemoryStore::new()
//!     .with_part_type(PartType { id: 1, name: "Frame".into(), required: true })
//!     .with_option(PartOption {
//!         id: 10,
//!         part_type_id: 1,
//!         name: "Diamond".into(),
//!         base_price_cents: 12_000,
//!         is_active: true,
//!     })
//!     .with_product(Product {
//!         id: 1,
//!         name: "Bicycle".into(),
//!         base_price_cents: 0,
//!         part_type_ids: vec![1],
//!     })
//!     .with_stock(10, 3, None);
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use crate::error::CoreResult;
use crate::store::{CatalogStore, InventoryStore};
use crate::types::{
    DecrementOutcome, IncompatibilityEdge, IncompatibilityRule, InventoryRecord, OptionId,
    PartOption, PartType, PartTypeId, PricingRule, Product, ProductId,
};

/// Catalog and inventory held in memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: HashMap<ProductId, Product>,
    part_types: HashMap<PartTypeId, PartType>,
    options: BTreeMap<OptionId, PartOption>,
    incompatibility_rules: Vec<IncompatibilityRule>,
    pricing_rules: Vec<PricingRule>,
    inventory: RwLock<HashMap<OptionId, InventoryRecord>>,
    inventory_reads: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id, product);
        self
    }

    pub fn with_part_type(mut self, part_type: PartType) -> Self {
        self.part_types.insert(part_type.id, part_type);
        self
    }

    pub fn with_option(mut self, option: PartOption) -> Self {
        self.options.insert(option.id, option);
        self
    }

    pub fn with_incompatibility_rule(mut self, rule: IncompatibilityRule) -> Self {
        self.incompatibility_rules.push(rule);
        self
    }

    pub fn with_pricing_rule(mut self, rule: PricingRule) -> Self {
        self.pricing_rules.push(rule);
        self
    }

    /// Sets the stock record for an option.
    pub fn with_stock(self, option_id: OptionId, quantity: i64, restock: Option<NaiveDate>) -> Self {
        self.set_stock(option_id, quantity, restock);
        self
    }

    /// Replaces the stock record for an option.
    pub fn set_stock(&self, option_id: OptionId, quantity: i64, restock: Option<NaiveDate>) {
        let mut inventory = self
            .inventory
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        inventory.insert(
            option_id,
            InventoryRecord {
                option_id,
                quantity,
                expected_restock_date: restock,
            },
        );
    }

    /// Number of `InventoryStore::records` calls served so far.
    pub fn inventory_reads(&self) -> usize {
        self.inventory_reads.load(Ordering::SeqCst)
    }

    fn part_types_of(&self, product_id: ProductId) -> Vec<PartType> {
        self.products
            .get(&product_id)
            .map(|product| {
                product
                    .part_type_ids
                    .iter()
                    .filter_map(|id| self.part_types.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn product(&self, product_id: ProductId) -> CoreResult<Option<Product>> {
        Ok(self.products.get(&product_id).cloned())
    }

    async fn part_types(&self, product_id: ProductId) -> CoreResult<Vec<PartType>> {
        Ok(self.part_types_of(product_id))
    }

    async fn required_part_types(&self, product_id: ProductId) -> CoreResult<Vec<PartType>> {
        Ok(self
            .part_types_of(product_id)
            .into_iter()
            .filter(|pt| pt.required)
            .collect())
    }

    async fn options_for_part_type(&self, part_type_id: PartTypeId) -> CoreResult<Vec<PartOption>> {
        Ok(self
            .options
            .values()
            .filter(|o| o.part_type_id == part_type_id && o.is_active)
            .cloned()
            .collect())
    }

    async fn options(&self, option_ids: &[OptionId]) -> CoreResult<Vec<PartOption>> {
        Ok(option_ids
            .iter()
            .filter_map(|id| self.options.get(id))
            .filter(|o| o.is_active)
            .cloned()
            .collect())
    }

    async fn incompatibility_edges(
        &self,
        option_ids: &[OptionId],
    ) -> CoreResult<Vec<IncompatibilityEdge>> {
        Ok(self
            .incompatibility_rules
            .iter()
            .flat_map(|rule| rule.edges())
            .filter(|e| {
                option_ids.contains(&e.from_option_id) || option_ids.contains(&e.to_option_id)
            })
            .collect())
    }

    async fn pricing_rules(&self, option_ids: &[OptionId]) -> CoreResult<Vec<PricingRule>> {
        Ok(self
            .pricing_rules
            .iter()
            .filter(|r| r.is_active && !r.condition_option_ids.is_empty())
            .filter(|r| r.condition_option_ids.iter().all(|id| option_ids.contains(id)))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl InventoryStore for InMemoryStore {
    async fn records(&self, option_ids: &[OptionId]) -> CoreResult<Vec<InventoryRecord>> {
        self.inventory_reads.fetch_add(1, Ordering::SeqCst);
        let inventory = self.inventory.read().unwrap_or_else(PoisonError::into_inner);

        Ok(option_ids
            .iter()
            .filter_map(|id| inventory.get(id).cloned())
            .collect())
    }

    async fn decrement(&self, option_id: OptionId, quantity: i64) -> CoreResult<DecrementOutcome> {
        crate::validation::validate_quantity(quantity)?;

        let mut inventory = self
            .inventory
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        match inventory.get_mut(&option_id) {
            Some(record) if record.quantity >= quantity => {
                record.quantity -= quantity;
                Ok(DecrementOutcome::Applied)
            }
            _ => Ok(DecrementOutcome::Insufficient { option_id }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
