//! # Configuration Engine
//!
//! Public entry points used by the cart, checkout and UI backend.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  available_options(product, part_type, selections)                      │
//! │       │                                                                 │
//! │       ├──► catalog: options of part type                                │
//! │       ├──► catalog: edges touching selections   (skipped if none)       │
//! │       │         └──► Compatibility Resolver                             │
//! │       ├──► inventory: records                   (skipped if no options) │
//! │       │         └──► Inventory Gate                                     │
//! │       └──► catalog: pricing rules               (skipped if none)       │
//! │                 └──► Pricing Engine (per option)                        │
//! │                                                                         │
//! │  validate_configuration(product, selections)                            │
//! │       └──► completeness ─► compatibility ─► availability ─► verdict     │
//! │            (each gate fetches only once earlier gates pass)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each request awaits one store access at a time. Validation is a pure
//! read: checkout wraps it together with the inventory decrement in its own
//! transaction.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use ts_rs::TS;

use crate::compatibility::{conflicting_pairs, resolve_compatible};
use crate::configuration::{
    check_availability, check_compatibility, check_completeness, ValidationOutcome,
};
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::inventory::{annotate_inventory, unavailable_options, StockStatus, StockedOption};
use crate::pricing::{price_configuration, price_option, ConfigurationPrice, OptionPrice};
use crate::store::{CatalogStore, InventoryStore};
use crate::types::{OptionId, PartOption, PartTypeId, PricingRule, Product, ProductId};
use crate::validation::validate_selection;

/// An option the customer can still pick, with stock and live price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AvailableOption {
    pub option: PartOption,
    pub stock: StockStatus,
    pub price: OptionPrice,
}

/// Configuration resolution and pricing over injected stores.
#[derive(Debug, Clone)]
pub struct ConfigurationEngine<C, I> {
    catalog: C,
    inventory: I,
}

impl<C, I> ConfigurationEngine<C, I>
where
    C: CatalogStore,
    I: InventoryStore,
{
    pub fn new(catalog: C, inventory: I) -> Self {
        ConfigurationEngine { catalog, inventory }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn inventory(&self) -> &I {
        &self.inventory
    }

    /// Options of `part_type_id` still choosable given `selections`.
    ///
    /// Incompatible options are removed. Out-of-stock options stay in the
    /// list, annotated, so the UI can show them with a restock date.
    /// Selections are checked like those of [`Self::validate_configuration`].
    pub async fn available_options(
        &self,
        product_id: ProductId,
        part_type_id: PartTypeId,
        selections: &[OptionId],
    ) -> CoreResult<Vec<AvailableOption>> {
        validate_selection(selections)?;
        debug!(product_id, part_type_id, selected = selections.len(), "Resolving available options");

        let product = self.load_product(product_id).await?;
        if !product.offers(part_type_id) {
            return Err(CoreError::PartTypeNotFound {
                product_id,
                part_type_id,
            });
        }
        self.load_selected(&product, selections).await?;

        let candidates = self.catalog.options_for_part_type(part_type_id).await?;
        let compatible = if selections.is_empty() {
            candidates
        } else {
            let edges = self.catalog.incompatibility_edges(selections).await?;
            resolve_compatible(candidates, selections, &edges)
        };

        let stocked = self.annotate(compatible).await?;

        let rules = if selections.is_empty() || stocked.is_empty() {
            Vec::new()
        } else {
            let mut rule_scope = selections.to_vec();
            rule_scope.extend(stocked.iter().map(|s| s.option.id));
            self.catalog.pricing_rules(&rule_scope).await?
        };

        let available: Vec<AvailableOption> = stocked
            .into_iter()
            .map(|StockedOption { option, stock }| {
                let price = price_option(&option, selections, &rules);
                AvailableOption {
                    option,
                    stock,
                    price,
                }
            })
            .collect();

        debug!(product_id, part_type_id, count = available.len(), "Resolved available options");
        Ok(available)
    }

    /// Live price of one option given the options already chosen.
    ///
    /// Every prior selection must be an active option of the product.
    pub async fn price_option(
        &self,
        product_id: ProductId,
        option_id: OptionId,
        selections: &[OptionId],
    ) -> CoreResult<OptionPrice> {
        validate_selection(selections)?;
        debug!(product_id, option_id, selected = selections.len(), "Pricing option");

        let product = self.load_product(product_id).await?;
        self.load_selected(&product, selections).await?;
        let option = self
            .catalog
            .options(&[option_id])
            .await?
            .into_iter()
            .next()
            .ok_or(CoreError::PartOptionNotFound(option_id))?;
        ensure_offered(&product, &option)?;

        let has_prior = selections.iter().any(|&id| id != option_id);
        let rules = if has_prior {
            let mut rule_scope = selections.to_vec();
            if !rule_scope.contains(&option_id) {
                rule_scope.push(option_id);
            }
            self.catalog.pricing_rules(&rule_scope).await?
        } else {
            Vec::new()
        };

        Ok(price_option(&option, selections, &rules))
    }

    /// Authoritative price of a configuration.
    ///
    /// Does not require the configuration to be complete; checkout validates
    /// separately.
    pub async fn calculate_total_price(
        &self,
        product_id: ProductId,
        selections: &[OptionId],
    ) -> CoreResult<ConfigurationPrice> {
        validate_selection(selections)?;
        debug!(product_id, selected = selections.len(), "Calculating total price");

        let product = self.load_product(product_id).await?;
        let options = self.load_selected(&product, selections).await?;

        let rules: Vec<PricingRule> = if selections.len() < 2 {
            Vec::new()
        } else {
            self.catalog.pricing_rules(selections).await?
        };

        let price = price_configuration(&product, &options, &rules);
        debug!(
            product_id,
            total_cents = price.total_price.cents(),
            adjustments = price.adjustments.len(),
            "Calculated total price"
        );
        Ok(price)
    }

    /// Decides whether `selections` is a purchasable configuration.
    ///
    /// Malformed requests (unknown options, two options for one part type,
    /// options from another product) are errors. A well-formed but
    /// unpurchasable configuration is `Ok(ValidationOutcome::Invalid)`.
    pub async fn validate_configuration(
        &self,
        product_id: ProductId,
        selections: &[OptionId],
    ) -> CoreResult<ValidationOutcome> {
        validate_selection(selections)?;
        debug!(product_id, selected = selections.len(), "Validating configuration");

        let product = self.load_product(product_id).await?;
        let options = self.load_selected(&product, selections).await?;

        let required = self.catalog.required_part_types(product_id).await?;
        if let Err(failure) = check_completeness(&required, &options) {
            return Ok(reject(product_id, failure.into()));
        }

        let edges = if selections.len() < 2 {
            Vec::new()
        } else {
            self.catalog.incompatibility_edges(selections).await?
        };
        if let Err(failure) = check_compatibility(conflicting_pairs(selections, &edges)) {
            return Ok(reject(product_id, failure.into()));
        }

        let records = if selections.is_empty() {
            Vec::new()
        } else {
            self.inventory.records(selections).await?
        };
        if let Err(failure) = check_availability(unavailable_options(selections, &records)) {
            return Ok(reject(product_id, failure.into()));
        }

        debug!(product_id, "Configuration is valid");
        Ok(ValidationOutcome::Valid)
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    async fn load_product(&self, product_id: ProductId) -> CoreResult<Product> {
        self.catalog
            .product(product_id)
            .await?
            .ok_or(CoreError::ProductNotFound(product_id))
    }

    /// Loads selected options in selection order and checks they form a
    /// well-shaped selection for the product.
    async fn load_selected(
        &self,
        product: &Product,
        selections: &[OptionId],
    ) -> CoreResult<Vec<PartOption>> {
        if selections.is_empty() {
            return Ok(Vec::new());
        }

        let mut by_id: HashMap<OptionId, PartOption> = self
            .catalog
            .options(selections)
            .await?
            .into_iter()
            .map(|o| (o.id, o))
            .collect();

        let mut seen_part_types = HashSet::with_capacity(selections.len());
        let mut options = Vec::with_capacity(selections.len());

        for &id in selections {
            let option = by_id.remove(&id).ok_or(CoreError::PartOptionNotFound(id))?;
            ensure_offered(product, &option)?;

            if !seen_part_types.insert(option.part_type_id) {
                return Err(ValidationError::Duplicate {
                    field: "part type".to_string(),
                    value: option.part_type_id.to_string(),
                }
                .into());
            }

            options.push(option);
        }

        Ok(options)
    }

    async fn annotate(&self, options: Vec<PartOption>) -> CoreResult<Vec<StockedOption>> {
        if options.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<OptionId> = options.iter().map(|o| o.id).collect();
        let records = self.inventory.records(&ids).await?;
        Ok(annotate_inventory(options, &records))
    }
}

fn ensure_offered(product: &Product, option: &PartOption) -> CoreResult<()> {
    if product.offers(option.part_type_id) {
        Ok(())
    } else {
        Err(CoreError::OptionNotOffered {
            option_id: option.id,
            product_id: product.id,
        })
    }
}

fn reject(product_id: ProductId, outcome: ValidationOutcome) -> ValidationOutcome {
    if let Some(failure) = outcome.failure() {
        info!(product_id, reason = failure.reason_code(), "Configuration rejected");
    }
    outcome
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::ValidationFailure;
    use crate::memory::InMemoryStore;
    use crate::money::Money;
    use crate::testing::bicycle_store;
    use crate::testing::ids::*;
    use crate::types::{DecrementOutcome, InventoryRecord, PartType, Product};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn engine() -> ConfigurationEngine<Arc<InMemoryStore>, Arc<InMemoryStore>> {
        let store = Arc::new(bicycle_store());
        ConfigurationEngine::new(store.clone(), store)
    }

    /// Bicycle store plus option 7001, whose part type no product offers.
    fn engine_with_sidecar() -> ConfigurationEngine<Arc<InMemoryStore>, Arc<InMemoryStore>> {
        let store = Arc::new(
            bicycle_store()
                .with_part_type(PartType {
                    id: 70,
                    name: "Sidecar".to_string(),
                    required: false,
                })
                .with_option(PartOption {
                    id: 7_001,
                    part_type_id: 70,
                    name: "Sidecar".to_string(),
                    base_price_cents: 1,
                    is_active: true,
                }),
        );
        ConfigurationEngine::new(store.clone(), store)
    }

    fn option_ids(options: &[AvailableOption]) -> Vec<OptionId> {
        options.iter().map(|o| o.option.id).collect()
    }

    const COMPLETE: [OptionId; 5] = [DIAMOND, SHINY, ROAD_WHEELS, BLACK_RIM, SINGLE_SPEED];

    // -------------------------------------------------------------------------
    // available_options
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_no_selection_offers_every_active_option() {
        let frames = engine().available_options(BICYCLE, FRAME, &[]).await.unwrap();

        assert_eq!(option_ids(&frames), vec![FULL_SUSPENSION, DIAMOND, STEP_THROUGH]);
        assert!(frames.iter().all(|o| o.price.final_price == o.price.base_price));
    }

    #[tokio::test]
    async fn test_exclusion_works_whichever_side_is_picked_first() {
        let engine = engine();

        // Rule stored as mountain wheels → diamond / step-through
        let frames = engine
            .available_options(BICYCLE, FRAME, &[MOUNTAIN_WHEELS])
            .await
            .unwrap();
        assert_eq!(option_ids(&frames), vec![FULL_SUSPENSION]);

        // Frame picked first must hide mountain wheels too
        let wheels = engine
            .available_options(BICYCLE, WHEELS, &[DIAMOND])
            .await
            .unwrap();
        assert_eq!(option_ids(&wheels), vec![ROAD_WHEELS, FAT_BIKE_WHEELS]);
    }

    #[tokio::test]
    async fn test_inactive_rule_excludes_nothing() {
        let chains = engine()
            .available_options(BICYCLE, CHAIN, &[FULL_SUSPENSION])
            .await
            .unwrap();
        assert_eq!(option_ids(&chains), vec![SINGLE_SPEED, EIGHT_SPEED]);
    }

    #[tokio::test]
    async fn test_out_of_stock_options_are_annotated_not_removed() {
        let rims = engine()
            .available_options(BICYCLE, RIM_COLOR, &[FAT_BIKE_WHEELS])
            .await
            .unwrap();

        assert_eq!(option_ids(&rims), vec![BLACK_RIM, BLUE_RIM]);
        let blue = &rims[1];
        assert!(!blue.stock.in_stock);
        assert_eq!(blue.stock.quantity, 0);
        assert_eq!(blue.stock.expected_restock_date, NaiveDate::from_ymd_opt(2026, 11, 15));

        let chains = engine().available_options(BICYCLE, CHAIN, &[]).await.unwrap();
        let eight_speed = chains.iter().find(|o| o.option.id == EIGHT_SPEED).unwrap();
        assert_eq!(eight_speed.stock, StockStatus::default());
    }

    #[tokio::test]
    async fn test_live_prices_reflect_prior_selection() {
        let frames = engine()
            .available_options(BICYCLE, FRAME, &[MATTE])
            .await
            .unwrap();

        let full = frames.iter().find(|o| o.option.id == FULL_SUSPENSION).unwrap();
        assert_eq!(full.price.final_price, Money::from_cents(19_500));
        assert_eq!(full.price.applied_adjustments[0].rule_id, 1);

        let diamond = frames.iter().find(|o| o.option.id == DIAMOND).unwrap();
        assert_eq!(diamond.price.final_price, Money::from_cents(10_000));
    }

    #[tokio::test]
    async fn test_no_inventory_read_when_nothing_is_compatible() {
        let store = Arc::new(bicycle_store().with_product(Product {
            id: 2,
            name: "Frameless".to_string(),
            base_price_cents: 0,
            part_type_ids: vec![99],
        }));
        let engine = ConfigurationEngine::new(store.clone(), store.clone());

        let options = engine.available_options(2, 99, &[]).await.unwrap();
        assert!(options.is_empty());
        assert_eq!(store.inventory_reads(), 0);
    }

    #[tokio::test]
    async fn test_unknown_product_and_part_type() {
        let engine = engine();

        assert!(matches!(
            engine.available_options(77, FRAME, &[]).await,
            Err(CoreError::ProductNotFound(77))
        ));
        assert!(matches!(
            engine.available_options(BICYCLE, 99, &[]).await,
            Err(CoreError::PartTypeNotFound { part_type_id: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_or_retired_prior_selection_is_rejected() {
        let store = Arc::new(bicycle_store());
        let engine = ConfigurationEngine::new(store.clone(), store.clone());

        assert!(matches!(
            engine.available_options(BICYCLE, FRAME, &[9_999]).await,
            Err(CoreError::PartOptionNotFound(9_999))
        ));
        assert!(matches!(
            engine.available_options(BICYCLE, FRAME, &[RETIRED_FRAME]).await,
            Err(CoreError::PartOptionNotFound(RETIRED_FRAME))
        ));
        assert!(matches!(
            engine.available_options(BICYCLE, CHAIN, &[DIAMOND, STEP_THROUGH]).await,
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert_eq!(store.inventory_reads(), 0);
    }

    // -------------------------------------------------------------------------
    // price_option
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_price_option_entry_point() {
        let engine = engine();

        let alone = engine.price_option(BICYCLE, MATTE, &[]).await.unwrap();
        assert_eq!(alone.final_price, Money::from_cents(3_500));

        let on_full = engine
            .price_option(BICYCLE, MATTE, &[FULL_SUSPENSION])
            .await
            .unwrap();
        assert_eq!(on_full.final_price, Money::from_cents(5_250));

        assert!(matches!(
            engine.price_option(BICYCLE, RETIRED_FRAME, &[]).await,
            Err(CoreError::PartOptionNotFound(RETIRED_FRAME))
        ));
    }

    #[tokio::test]
    async fn test_price_option_rejects_unknown_prior_selection() {
        let engine = engine();

        // Rule 1 would fire on MATTE if the bogus id counted as a prior pick
        assert!(matches!(
            engine.price_option(BICYCLE, MATTE, &[9_999]).await,
            Err(CoreError::PartOptionNotFound(9_999))
        ));
        assert!(matches!(
            engine.price_option(BICYCLE, MATTE, &[RETIRED_FRAME]).await,
            Err(CoreError::PartOptionNotFound(RETIRED_FRAME))
        ));
    }

    #[tokio::test]
    async fn test_prior_selection_from_another_product_is_rejected() {
        let engine = engine_with_sidecar();

        assert!(matches!(
            engine.available_options(BICYCLE, FRAME, &[7_001]).await,
            Err(CoreError::OptionNotOffered { option_id: 7_001, .. })
        ));
        assert!(matches!(
            engine.price_option(BICYCLE, MATTE, &[7_001]).await,
            Err(CoreError::OptionNotOffered { option_id: 7_001, .. })
        ));
    }

    // -------------------------------------------------------------------------
    // calculate_total_price
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_total_price_with_percentage_rule() {
        let price = engine()
            .calculate_total_price(
                BICYCLE,
                &[FULL_SUSPENSION, MATTE, ROAD_WHEELS, BLACK_RIM, SINGLE_SPEED],
            )
            .await
            .unwrap();

        // 50.00 + (130 + 35 + 80 + 25 + 43) = 363.00, ×1.5 = 544.50
        assert_eq!(price.base_price, Money::from_cents(5_000));
        assert_eq!(price.option_price_sum, Money::from_cents(31_300));
        assert_eq!(price.total_price, Money::from_cents(54_450));
    }

    #[tokio::test]
    async fn test_total_price_with_fixed_discount() {
        let price = engine().calculate_total_price(BICYCLE, &COMPLETE).await.unwrap();

        // 50.00 + (100 + 30 + 80 + 25 + 43) = 328.00, -5.00 = 323.00
        assert_eq!(price.total_price, Money::from_cents(32_300));
        assert_eq!(price.adjustments.len(), 1);
        assert_eq!(price.adjustments[0].amount, Money::from_cents(-500));
    }

    #[tokio::test]
    async fn test_total_price_of_partial_selection() {
        let price = engine()
            .calculate_total_price(BICYCLE, &[DIAMOND])
            .await
            .unwrap();
        assert_eq!(price.total_price, Money::from_cents(15_000));
    }

    // -------------------------------------------------------------------------
    // validate_configuration
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_complete_configuration_is_valid() {
        let outcome = engine().validate_configuration(BICYCLE, &COMPLETE).await.unwrap();
        assert_eq!(outcome, ValidationOutcome::Valid);

        let mut with_bell = COMPLETE.to_vec();
        with_bell.push(CLASSIC_BELL);
        let outcome = engine().validate_configuration(BICYCLE, &with_bell).await.unwrap();
        assert!(outcome.is_valid());
    }

    #[tokio::test]
    async fn test_missing_required_short_circuits() {
        let store = Arc::new(bicycle_store());
        let engine = ConfigurationEngine::new(store.clone(), store.clone());

        let outcome = engine
            .validate_configuration(BICYCLE, &[DIAMOND, SHINY, CLASSIC_BELL])
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ValidationOutcome::Invalid(ValidationFailure::MissingRequired {
                part_types: vec![
                    "Wheels".to_string(),
                    "Rim color".to_string(),
                    "Chain".to_string()
                ],
            })
        );
        assert_eq!(store.inventory_reads(), 0);
    }

    #[tokio::test]
    async fn test_empty_selection_misses_everything_required() {
        let outcome = engine().validate_configuration(BICYCLE, &[]).await.unwrap();
        match outcome.failure() {
            Some(ValidationFailure::MissingRequired { part_types }) => {
                assert_eq!(part_types.len(), 5)
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_incompatible_pair_in_either_order() {
        let engine = engine();
        let expected = ValidationOutcome::Invalid(ValidationFailure::IncompatibleCombination {
            pairs: vec![(DIAMOND, MOUNTAIN_WHEELS)],
        });

        let frame_first = engine
            .validate_configuration(
                BICYCLE,
                &[DIAMOND, SHINY, MOUNTAIN_WHEELS, BLACK_RIM, SINGLE_SPEED],
            )
            .await
            .unwrap();
        let wheels_first = engine
            .validate_configuration(
                BICYCLE,
                &[MOUNTAIN_WHEELS, SINGLE_SPEED, BLACK_RIM, SHINY, DIAMOND],
            )
            .await
            .unwrap();

        assert_eq!(frame_first, expected);
        assert_eq!(wheels_first, expected);
    }

    #[tokio::test]
    async fn test_out_of_stock_rejected_after_other_gates_pass() {
        let engine = engine();

        let outcome = engine
            .validate_configuration(BICYCLE, &[DIAMOND, SHINY, ROAD_WHEELS, BLUE_RIM, SINGLE_SPEED])
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ValidationOutcome::Invalid(ValidationFailure::OutOfStock {
                option_ids: vec![BLUE_RIM],
            })
        );

        // No inventory record at all
        let outcome = engine
            .validate_configuration(BICYCLE, &[DIAMOND, SHINY, ROAD_WHEELS, BLACK_RIM, EIGHT_SPEED])
            .await
            .unwrap();
        assert_eq!(outcome.failure().map(|f| f.reason_code()), Some("out-of-stock"));
    }

    #[tokio::test]
    async fn test_validation_is_idempotent() {
        let engine = engine();
        let selection = [DIAMOND, SHINY, MOUNTAIN_WHEELS, BLACK_RIM, SINGLE_SPEED];

        let first = engine.validate_configuration(BICYCLE, &selection).await.unwrap();
        let second = engine.validate_configuration(BICYCLE, &selection).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_selections_are_errors() {
        let engine = engine();

        assert!(matches!(
            engine.validate_configuration(BICYCLE, &[DIAMOND, DIAMOND]).await,
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert!(matches!(
            engine.validate_configuration(BICYCLE, &[DIAMOND, STEP_THROUGH]).await,
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert!(matches!(
            engine.validate_configuration(BICYCLE, &[DIAMOND, 9_999]).await,
            Err(CoreError::PartOptionNotFound(9_999))
        ));
        assert!(matches!(
            engine.validate_configuration(BICYCLE, &[RETIRED_FRAME]).await,
            Err(CoreError::PartOptionNotFound(RETIRED_FRAME))
        ));
    }

    #[tokio::test]
    async fn test_option_from_another_product_is_rejected() {
        let engine = engine_with_sidecar();

        assert!(matches!(
            engine.calculate_total_price(BICYCLE, &[DIAMOND, 7_001]).await,
            Err(CoreError::OptionNotOffered { option_id: 7_001, .. })
        ));
    }

    #[tokio::test]
    async fn test_checkout_flow_last_unit() {
        let store = Arc::new(bicycle_store());
        store.set_stock(SINGLE_SPEED, 1, None);
        let engine = ConfigurationEngine::new(store.clone(), store.clone());

        assert!(engine
            .validate_configuration(BICYCLE, &COMPLETE)
            .await
            .unwrap()
            .is_valid());
        for id in COMPLETE {
            assert_eq!(
                engine.inventory().decrement(id, 1).await.unwrap(),
                DecrementOutcome::Applied
            );
        }

        // Re-validating after the decrement sees the chain is gone
        let outcome = engine.validate_configuration(BICYCLE, &COMPLETE).await.unwrap();
        assert_eq!(
            outcome,
            ValidationOutcome::Invalid(ValidationFailure::OutOfStock {
                option_ids: vec![SINGLE_SPEED],
            })
        );
    }

    // -------------------------------------------------------------------------
    // Store failures
    // -------------------------------------------------------------------------

    struct BrokenInventory;

    #[async_trait]
    impl InventoryStore for BrokenInventory {
        async fn records(&self, _option_ids: &[OptionId]) -> CoreResult<Vec<InventoryRecord>> {
            Err(CoreError::data_access(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "inventory service unreachable",
            )))
        }

        async fn decrement(&self, _option_id: OptionId, _quantity: i64) -> CoreResult<DecrementOutcome> {
            Err(CoreError::data_access("read-only replica"))
        }
    }

    #[tokio::test]
    async fn test_store_failure_aborts_request() {
        let engine = ConfigurationEngine::new(bicycle_store(), BrokenInventory);

        let err = engine
            .validate_configuration(BICYCLE, &COMPLETE)
            .await
            .unwrap_err();
        match err {
            CoreError::DataAccess(source) => {
                assert!(source.downcast_ref::<std::io::Error>().is_some())
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // Gates that never reach the inventory still answer
        let outcome = engine.validate_configuration(BICYCLE, &[DIAMOND]).await.unwrap();
        assert!(!outcome.is_valid());
    }
}
