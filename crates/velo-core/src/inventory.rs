//! # Inventory Gate
//!
//! Attaches stock status to part options.
//!
//! A missing inventory record means "nothing on hand", never "unlimited".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;

use crate::types::{InventoryRecord, OptionId, PartOption};

/// Stock status shown next to an option.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockStatus {
    pub quantity: i64,
    pub in_stock: bool,
    #[ts(as = "Option<String>")]
    pub expected_restock_date: Option<NaiveDate>,
}

impl StockStatus {
    /// Builds the status for an option from its record, if any.
    pub fn from_record(record: Option<&InventoryRecord>) -> Self {
        match record {
            Some(record) => StockStatus {
                quantity: record.quantity,
                in_stock: record.in_stock(),
                expected_restock_date: record.expected_restock_date,
            },
            None => StockStatus::default(),
        }
    }

    /// Whether the option can be purchased right now.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.in_stock && self.quantity > 0
    }
}

/// A part option together with its stock status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockedOption {
    pub option: PartOption,
    pub stock: StockStatus,
}

/// Annotates each option with its stock status.
///
/// Options keep their input order. Options with no record get the default
/// status `{quantity: 0, in_stock: false}`.
pub fn annotate_inventory(
    options: Vec<PartOption>,
    records: &[InventoryRecord],
) -> Vec<StockedOption> {
    let by_option = index_records(records);

    options
        .into_iter()
        .map(|option| {
            let stock = StockStatus::from_record(by_option.get(&option.id).copied());
            StockedOption { option, stock }
        })
        .collect()
}

/// Returns the selected ids that cannot be purchased, in selection order.
pub fn unavailable_options(selected: &[OptionId], records: &[InventoryRecord]) -> Vec<OptionId> {
    let by_option = index_records(records);

    selected
        .iter()
        .copied()
        .filter(|id| !StockStatus::from_record(by_option.get(id).copied()).is_available())
        .collect()
}

fn index_records(records: &[InventoryRecord]) -> HashMap<OptionId, &InventoryRecord> {
    records.iter().map(|r| (r.option_id, r)).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn option(id: OptionId) -> PartOption {
        PartOption {
            id,
            part_type_id: 1,
            name: format!("option-{id}"),
            base_price_cents: 500,
            is_active: true,
        }
    }

    fn record(option_id: OptionId, quantity: i64) -> InventoryRecord {
        InventoryRecord {
            option_id,
            quantity,
            expected_restock_date: None,
        }
    }

    #[test]
    fn test_missing_record_defaults_to_out_of_stock() {
        let annotated = annotate_inventory(vec![option(1)], &[]);

        assert_eq!(annotated.len(), 1);
        assert_eq!(annotated[0].stock.quantity, 0);
        assert!(!annotated[0].stock.in_stock);
        assert_eq!(annotated[0].stock.expected_restock_date, None);
    }

    #[test]
    fn test_annotation_keeps_order_and_restock_date() {
        let restock = NaiveDate::from_ymd_opt(2026, 11, 2);
        let records = [
            record(2, 4),
            InventoryRecord {
                option_id: 1,
                quantity: 0,
                expected_restock_date: restock,
            },
        ];

        let annotated = annotate_inventory(vec![option(1), option(2)], &records);

        assert_eq!(annotated[0].option.id, 1);
        assert!(!annotated[0].stock.in_stock);
        assert_eq!(annotated[0].stock.expected_restock_date, restock);
        assert_eq!(annotated[1].option.id, 2);
        assert_eq!(annotated[1].stock.quantity, 4);
        assert!(annotated[1].stock.in_stock);
    }

    #[test]
    fn test_empty_input() {
        assert!(annotate_inventory(Vec::new(), &[record(1, 3)]).is_empty());
    }

    #[test]
    fn test_unavailable_options() {
        let records = [record(1, 3), record(2, 0)];
        // 3 has no record at all
        assert_eq!(unavailable_options(&[3, 1, 2], &records), vec![3, 2]);
        assert!(unavailable_options(&[1], &records).is_empty());
    }
}
