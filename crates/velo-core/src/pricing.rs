//! # Pricing Engine
//!
//! Prices single options (live deltas while configuring) and full
//! configurations (the authoritative checkout total).
//!
//! ## Sequential Compounding
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base 100 + options (20 + 30)                       = 150.00            │
//! │       │                                                                 │
//! │       ▼  rule #1  fixed +10      (applied to 150.00) = 160.00           │
//! │       │                                                                 │
//! │       ▼  rule #2  +10%           (applied to 160.00) = 176.00           │
//! │                                                                         │
//! │  NOT simultaneous: 150 + 10 + 15 = 175.00  ❌                           │
//! │                                                                         │
//! │  Rules run in ascending rule id. The order is part of the contract,    │
//! │  so it is enforced here rather than trusted from the store.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rule fires when all of its condition options are selected. Empty and
//! single-option selections never evaluate rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Adjustment, OptionId, PartOption, PricingRule, Product, ProductId, RuleId};

// =============================================================================
// Result Types
// =============================================================================

/// One rule applied during a pricing pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppliedAdjustment {
    pub rule_id: RuleId,
    pub adjustment: Adjustment,
    /// Change this step made to the running total.
    pub amount: Money,
    /// Running total after this step.
    pub running_total: Money,
}

/// Price of a single option given the options already chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OptionPrice {
    pub option_id: OptionId,
    pub base_price: Money,
    pub final_price: Money,
    pub applied_adjustments: Vec<AppliedAdjustment>,
}

/// Price of a full configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfigurationPrice {
    pub product_id: ProductId,
    /// The product's own base price.
    pub base_price: Money,
    /// Sum of the selected options' base prices.
    pub option_price_sum: Money,
    pub adjustments: Vec<AppliedAdjustment>,
    pub total_price: Money,
}

// =============================================================================
// Rule Application
// =============================================================================

/// Returns the rules that fire for `selection`, sorted by ascending id.
///
/// Duplicate rule ids (a store returning the same rule twice) are collapsed.
pub fn matching_rules<'a>(
    rules: &'a [PricingRule],
    selection: &BTreeSet<OptionId>,
) -> Vec<&'a PricingRule> {
    let mut matched: Vec<&PricingRule> = rules.iter().filter(|r| r.fires_for(selection)).collect();
    matched.sort_by_key(|r| r.id);
    matched.dedup_by_key(|r| r.id);
    matched
}

/// Applies rules in the given order, each to the previous step's total.
pub fn apply_adjustments(base: Money, rules: &[&PricingRule]) -> (Money, Vec<AppliedAdjustment>) {
    let mut running_total = base;
    let mut applied = Vec::with_capacity(rules.len());

    for rule in rules {
        let next = rule.adjustment.apply(running_total);
        applied.push(AppliedAdjustment {
            rule_id: rule.id,
            adjustment: rule.adjustment,
            amount: next - running_total,
            running_total: next,
        });
        running_total = next;
    }

    (running_total, applied)
}

// =============================================================================
// Option Pricing
// =============================================================================

/// Prices `option` as a hypothetical addition to `prior`.
///
/// ## Rules Considered
/// - The candidate set is `prior ∪ {option}`
/// - A rule must fire for the candidate set AND reference `option`; rules
///   about other options are not this option's price delta
/// - With no other option selected, no rule is evaluated
///
/// ## Example
/// ```rust
/// use velo_core::money::{Money, Percentage};
/// use velo_core::pricing::price_option;
/// use velo_core::types::{Adjustment, PartOption, PricingRule};
///
/// let finish = PartOption {
///     id: 12,
///     part_type_id: 3,
///     name: "Matte finish".into(),
///     base_price_cents: 3500,
///     is_active: true,
/// };
/// // Matte finish costs 50% more on a full-suspension frame (id 2)
/// let rule = PricingRule {
///     id: 1,
///     adjustment: Adjustment::Percentage(Percentage::from_percent(50)),
///     condition_option_ids: [2, 12].into_iter().collect(),
///     is_active: true,
/// };
///
/// let price = price_option(&finish, &[2], &[rule]);
/// assert_eq!(price.final_price, Money::from_cents(5250));
/// ```
pub fn price_option(option: &PartOption, prior: &[OptionId], rules: &[PricingRule]) -> OptionPrice {
    let base = option.base_price();

    let mut selection: BTreeSet<OptionId> = prior.iter().copied().collect();
    selection.insert(option.id);

    let (final_price, applied) = if selection.len() < 2 {
        (base, Vec::new())
    } else {
        let matched: Vec<&PricingRule> = matching_rules(rules, &selection)
            .into_iter()
            .filter(|r| r.references(option.id))
            .collect();
        apply_adjustments(base, &matched)
    };

    OptionPrice {
        option_id: option.id,
        base_price: base,
        final_price,
        applied_adjustments: applied,
    }
}

// =============================================================================
// Configuration Pricing
// =============================================================================

/// Prices a full configuration.
///
/// `product.base_price + Σ option prices`, then one sequential pass over
/// every rule firing for the whole selection.
pub fn price_configuration(
    product: &Product,
    options: &[PartOption],
    rules: &[PricingRule],
) -> ConfigurationPrice {
    let option_price_sum: Money = options.iter().map(PartOption::base_price).sum();
    let subtotal = product.base_price() + option_price_sum;

    let selection: BTreeSet<OptionId> = options.iter().map(|o| o.id).collect();

    let (total_price, adjustments) = if selection.len() < 2 {
        (subtotal, Vec::new())
    } else {
        apply_adjustments(subtotal, &matching_rules(rules, &selection))
    };

    ConfigurationPrice {
        product_id: product.id,
        base_price: product.base_price(),
        option_price_sum,
        adjustments,
        total_price,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
