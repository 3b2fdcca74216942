//! Bicycle catalog shared by the engine and store tests.
//!
//! Mirrors `velo-db/fixtures/demo_catalog.sql` so both backends are tested
//! against the same data.

use chrono::NaiveDate;

use crate::memory::InMemoryStore;
use crate::money::{Money, Percentage};
use crate::types::{
    Adjustment, IncompatibilityRule, PartOption, PartType, PricingRule, Product,
};

pub mod ids {
    use crate::types::{OptionId, PartTypeId, ProductId};

    pub const BICYCLE: ProductId = 1;

    pub const FRAME: PartTypeId = 1;
    pub const FINISH: PartTypeId = 2;
    pub const WHEELS: PartTypeId = 3;
    pub const RIM_COLOR: PartTypeId = 4;
    pub const CHAIN: PartTypeId = 5;
    pub const BELL: PartTypeId = 6;

    pub const FULL_SUSPENSION: OptionId = 101;
    pub const DIAMOND: OptionId = 102;
    pub const STEP_THROUGH: OptionId = 103;
    pub const RETIRED_FRAME: OptionId = 104;

    pub const MATTE: OptionId = 201;
    pub const SHINY: OptionId = 202;

    pub const ROAD_WHEELS: OptionId = 301;
    pub const MOUNTAIN_WHEELS: OptionId = 302;
    pub const FAT_BIKE_WHEELS: OptionId = 303;

    pub const RED_RIM: OptionId = 401;
    pub const BLACK_RIM: OptionId = 402;
    pub const BLUE_RIM: OptionId = 403;

    pub const SINGLE_SPEED: OptionId = 501;
    pub const EIGHT_SPEED: OptionId = 502;

    pub const CLASSIC_BELL: OptionId = 601;
}

use ids::*;

fn part_type(id: i64, name: &str, required: bool) -> PartType {
    PartType {
        id,
        name: name.to_string(),
        required,
    }
}

fn option(id: i64, part_type_id: i64, name: &str, price_cents: i64) -> PartOption {
    PartOption {
        id,
        part_type_id,
        name: name.to_string(),
        base_price_cents: price_cents,
        is_active: true,
    }
}

fn pricing_rule(id: i64, adjustment: Adjustment, conditions: &[i64], active: bool) -> PricingRule {
    PricingRule {
        id,
        adjustment,
        condition_option_ids: conditions.iter().copied().collect(),
        is_active: active,
    }
}

/// The demo bicycle catalog with stock.
///
/// - Mountain wheels only fit the full-suspension frame (rule 1)
/// - Fat bike wheels cannot take red rims (rule 2)
/// - Rule 3 (full-suspension ✗ 8-speed) is inactive
/// - Matte finish on full-suspension: +50% (pricing rule 1)
/// - Diamond + shiny bundle: -5.00 (pricing rule 2)
/// - Blue rims are out of stock; the 8-speed chain has no inventory record
pub fn bicycle_store() -> InMemoryStore {
    let mut retired = option(RETIRED_FRAME, FRAME, "Retired frame", 8_000);
    retired.is_active = false;

    InMemoryStore::new()
        .with_product(Product {
            id: BICYCLE,
            name: "Custom Bicycle".to_string(),
            base_price_cents: 5_000,
            part_type_ids: vec![FRAME, FINISH, WHEELS, RIM_COLOR, CHAIN, BELL],
        })
        .with_part_type(part_type(FRAME, "Frame", true))
        .with_part_type(part_type(FINISH, "Finish", true))
        .with_part_type(part_type(WHEELS, "Wheels", true))
        .with_part_type(part_type(RIM_COLOR, "Rim color", true))
        .with_part_type(part_type(CHAIN, "Chain", true))
        .with_part_type(part_type(BELL, "Bell", false))
        .with_option(option(FULL_SUSPENSION, FRAME, "Full-suspension", 13_000))
        .with_option(option(DIAMOND, FRAME, "Diamond", 10_000))
        .with_option(option(STEP_THROUGH, FRAME, "Step-through", 9_000))
        .with_option(retired)
        .with_option(option(MATTE, FINISH, "Matte", 3_500))
        .with_option(option(SHINY, FINISH, "Shiny", 3_000))
        .with_option(option(ROAD_WHEELS, WHEELS, "Road wheels", 8_000))
        .with_option(option(MOUNTAIN_WHEELS, WHEELS, "Mountain wheels", 10_000))
        .with_option(option(FAT_BIKE_WHEELS, WHEELS, "Fat bike wheels", 12_000))
        .with_option(option(RED_RIM, RIM_COLOR, "Red", 2_000))
        .with_option(option(BLACK_RIM, RIM_COLOR, "Black", 2_500))
        .with_option(option(BLUE_RIM, RIM_COLOR, "Blue", 2_000))
        .with_option(option(SINGLE_SPEED, CHAIN, "Single-speed chain", 4_300))
        .with_option(option(EIGHT_SPEED, CHAIN, "8-speed chain", 5_500))
        .with_option(option(CLASSIC_BELL, BELL, "Classic bell", 1_000))
        .with_incompatibility_rule(IncompatibilityRule {
            id: 1,
            is_active: true,
            pairs: vec![(MOUNTAIN_WHEELS, DIAMOND), (MOUNTAIN_WHEELS, STEP_THROUGH)],
        })
        .with_incompatibility_rule(IncompatibilityRule {
            id: 2,
            is_active: true,
            pairs: vec![(FAT_BIKE_WHEELS, RED_RIM)],
        })
        .with_incompatibility_rule(IncompatibilityRule {
            id: 3,
            is_active: false,
            pairs: vec![(FULL_SUSPENSION, EIGHT_SPEED)],
        })
        .with_pricing_rule(pricing_rule(
            1,
            Adjustment::Percentage(Percentage::from_percent(50)),
            &[FULL_SUSPENSION, MATTE],
            true,
        ))
        .with_pricing_rule(pricing_rule(
            2,
            Adjustment::Fixed(Money::from_cents(-500)),
            &[DIAMOND, SHINY],
            true,
        ))
        .with_pricing_rule(pricing_rule(
            3,
            Adjustment::Fixed(Money::from_cents(9_900)),
            &[ROAD_WHEELS],
            false,
        ))
        .with_stock(FULL_SUSPENSION, 5, None)
        .with_stock(DIAMOND, 5, None)
        .with_stock(STEP_THROUGH, 5, None)
        .with_stock(MATTE, 5, None)
        .with_stock(SHINY, 5, None)
        .with_stock(ROAD_WHEELS, 5, None)
        .with_stock(MOUNTAIN_WHEELS, 5, None)
        .with_stock(FAT_BIKE_WHEELS, 5, None)
        .with_stock(RED_RIM, 5, None)
        .with_stock(BLACK_RIM, 5, None)
        .with_stock(BLUE_RIM, 0, NaiveDate::from_ymd_opt(2026, 11, 15))
        .with_stock(SINGLE_SPEED, 5, None)
        .with_stock(CLASSIC_BELL, 3, None)
}
