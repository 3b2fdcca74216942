//! # Domain Types
//!
//! Catalog and inventory types read by the configuration engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │──►│    PartType     │◄──│   PartOption    │       │
//! │  │  ─────────────  │ * │  ─────────────  │ 1 │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  base_price     │   │  name "Frame"   │   │  part_type_id   │       │
//! │  │  part_type_ids  │   │  required       │   │  base_price     │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                       │                 │
//! │  ┌──────────────────────┐  ┌─────────────────┐  ┌─────┴───────────┐    │
//! │  │ IncompatibilityEdge  │  │  PricingRule    │  │ InventoryRecord │    │
//! │  │  ──────────────────  │  │  ─────────────  │  │  ─────────────  │    │
//! │  │  from ──✗──► to      │  │  conditions (∧) │  │  quantity       │    │
//! │  │  (checked both ways) │  │  adjustment     │  │  restock date   │    │
//! │  └──────────────────────┘  └─────────────────┘  └─────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Catalog types are read-only inputs for the duration of a configuration
//! session. Only administrative collaborators create or change them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::money::{Money, Percentage};

// =============================================================================
// Identifiers
// =============================================================================

/// Product primary key.
pub type ProductId = i64;

/// PartType primary key.
pub type PartTypeId = i64;

/// PartOption primary key.
pub type OptionId = i64;

/// Incompatibility or pricing rule primary key.
pub type RuleId = i64;

// =============================================================================
// Product
// =============================================================================

/// A configurable product (e.g., a bicycle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Price of the bare product before any part is chosen, in cents.
    pub base_price_cents: i64,
    /// Part types offered on this product, in display order.
    pub part_type_ids: Vec<PartTypeId>,
}

impl Product {
    /// Returns the base price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }

    /// Checks whether the product offers the given part type.
    pub fn offers(&self, part_type_id: PartTypeId) -> bool {
        self.part_type_ids.contains(&part_type_id)
    }
}

// =============================================================================
// Part Type
// =============================================================================

/// A customizable slot on a product (e.g., "Frame", "Wheels").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PartType {
    pub id: PartTypeId,
    pub name: String,
    /// A valid configuration must supply one option of this type.
    pub required: bool,
}

// =============================================================================
// Part Option
// =============================================================================

/// One concrete choice for a part type (e.g., "Diamond frame").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct PartOption {
    pub id: OptionId,
    pub part_type_id: PartTypeId,
    pub name: String,
    pub base_price_cents: i64,
    /// Inactive options are retired from the catalog and never offered.
    pub is_active: bool,
}

impl PartOption {
    /// Returns the base price as Money.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// Stock level for one part option.
///
/// `in_stock` is derived from `quantity` on read. There is no separately
/// stored flag that could drift out of sync after a decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct InventoryRecord {
    pub option_id: OptionId,
    pub quantity: i64,
    #[ts(as = "Option<String>")]
    pub expected_restock_date: Option<NaiveDate>,
}

impl InventoryRecord {
    /// Whether at least one unit is on hand.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }
}

/// Result of a conditional inventory decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecrementOutcome {
    /// Quantity was reduced.
    Applied,
    /// Not enough stock (or no record); nothing was changed.
    Insufficient { option_id: OptionId },
}

// =============================================================================
// Incompatibility Rules
// =============================================================================

/// One directed edge of an active incompatibility rule:
/// "if `from` is selected, `to` is excluded".
///
/// The engine enforces every edge in both directions, since customers may
/// pick the two parts in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct IncompatibilityEdge {
    pub rule_id: RuleId,
    pub from_option_id: OptionId,
    pub to_option_id: OptionId,
}

impl IncompatibilityEdge {
    /// Whether both ends are the same option. Such an edge constrains nothing.
    pub fn is_self_loop(&self) -> bool {
        self.from_option_id == self.to_option_id
    }

    /// The option on the other end of the edge, if `option_id` is on it.
    pub fn other_end(&self, option_id: OptionId) -> Option<OptionId> {
        if self.from_option_id == option_id {
            Some(self.to_option_id)
        } else if self.to_option_id == option_id {
            Some(self.from_option_id)
        } else {
            None
        }
    }
}

/// A named constraint made of one or more directed option pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IncompatibilityRule {
    pub id: RuleId,
    pub is_active: bool,
    /// `(a, b)`: if `a` is selected, `b` is excluded.
    pub pairs: Vec<(OptionId, OptionId)>,
}

impl IncompatibilityRule {
    /// Flattens the rule into edges. Inactive rules yield none.
    pub fn edges(&self) -> impl Iterator<Item = IncompatibilityEdge> + '_ {
        self.pairs
            .iter()
            .filter(move |_| self.is_active)
            .map(move |&(from, to)| IncompatibilityEdge {
                rule_id: self.id,
                from_option_id: from,
                to_option_id: to,
            })
    }
}

// =============================================================================
// Pricing Rules
// =============================================================================

/// A price adjustment carried by a pricing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Adjustment {
    /// Adds a constant amount (negative for a discount).
    Fixed(Money),
    /// Multiplies the running total by `(1 + pct/100)`.
    Percentage(Percentage),
}

impl Adjustment {
    /// Applies this adjustment to a running total.
    pub fn apply(&self, running_total: Money) -> Money {
        match self {
            Adjustment::Fixed(amount) => running_total + *amount,
            Adjustment::Percentage(pct) => running_total.apply_percentage(*pct),
        }
    }
}

/// A conditional price adjustment that fires when every option in its
/// condition set is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingRule {
    pub id: RuleId,
    pub adjustment: Adjustment,
    #[ts(as = "Vec<OptionId>")]
    pub condition_option_ids: BTreeSet<OptionId>,
    pub is_active: bool,
}

impl PricingRule {
    /// AND semantics: fires only if the condition set is non-empty and
    /// fully contained in `selection`.
    pub fn fires_for(&self, selection: &BTreeSet<OptionId>) -> bool {
        self.is_active
            && !self.condition_option_ids.is_empty()
            && self.condition_option_ids.is_subset(selection)
    }

    /// Whether `option_id` is one of the rule's conditions.
    pub fn references(&self, option_id: OptionId) -> bool {
        self.condition_option_ids.contains(&option_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(conditions: &[OptionId]) -> PricingRule {
        PricingRule {
            id: 1,
            adjustment: Adjustment::Fixed(Money::from_cents(1000)),
            condition_option_ids: conditions.iter().copied().collect(),
            is_active: true,
        }
    }

    #[test]
    fn test_in_stock_is_derived_from_quantity() {
        let mut record = InventoryRecord {
            option_id: 7,
            quantity: 1,
            expected_restock_date: None,
        };
        assert!(record.in_stock());

        record.quantity = 0;
        assert!(!record.in_stock());
    }

    #[test]
    fn test_edge_other_end_both_directions() {
        let edge = IncompatibilityEdge {
            rule_id: 1,
            from_option_id: 10,
            to_option_id: 20,
        };
        assert!(!edge.is_self_loop());
        assert_eq!(edge.other_end(10), Some(20));
        assert_eq!(edge.other_end(20), Some(10));
        assert_eq!(edge.other_end(30), None);
    }

    #[test]
    fn test_rule_requires_every_condition() {
        let r = rule(&[1, 2]);
        assert!(r.fires_for(&[1, 2, 3].into_iter().collect()));
        assert!(!r.fires_for(&[1, 3].into_iter().collect()));
    }

    #[test]
    fn test_rule_with_no_conditions_never_fires() {
        let r = rule(&[]);
        assert!(!r.fires_for(&[1, 2].into_iter().collect()));
    }

    #[test]
    fn test_inactive_rule_never_fires() {
        let mut r = rule(&[1]);
        r.is_active = false;
        assert!(!r.fires_for(&[1].into_iter().collect()));
    }

    #[test]
    fn test_adjustment_serializes_tagged() {
        let json = serde_json::to_string(&Adjustment::Percentage(Percentage::from_bps(1000)))
            .unwrap();
        assert_eq!(json, r#"{"kind":"percentage","value":1000}"#);
    }
}
