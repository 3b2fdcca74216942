//! # Configuration Validator
//!
//! Decides whether a complete selection is purchasable.
//!
//! ## Gates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  selection                                                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  1. Completeness ──✗──► MissingRequired { part_types: ["Wheels"] }      │
//! │     │ ✓                                                                 │
//! │     ▼                                                                   │
//! │  2. Compatibility ─✗──► IncompatibleCombination { pairs: [(2, 7)] }     │
//! │     │ ✓                                                                 │
//! │     ▼                                                                   │
//! │  3. Availability ──✗──► OutOfStock { option_ids: [9] }                  │
//! │     │ ✓                                                                 │
//! │     ▼                                                                   │
//! │  Valid                                                                  │
//! │                                                                         │
//! │  First failure wins; later gates are not evaluated.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures are values, not errors: the UI renders them. Callers re-run
//! validation after any change in selection or inventory.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::types::{OptionId, PartOption, PartType};

// =============================================================================
// Outcome Types
// =============================================================================

/// Why a configuration cannot be purchased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum ValidationFailure {
    /// Required part types with no selected option, by name.
    MissingRequired { part_types: Vec<String> },
    /// Selected options that may not be combined.
    IncompatibleCombination { pairs: Vec<(OptionId, OptionId)> },
    /// Selected options with nothing in stock.
    OutOfStock { option_ids: Vec<OptionId> },
}

impl ValidationFailure {
    /// Stable reason code for clients.
    pub fn reason_code(&self) -> &'static str {
        match self {
            ValidationFailure::MissingRequired { .. } => "missing-required",
            ValidationFailure::IncompatibleCombination { .. } => "incompatible-combination",
            ValidationFailure::OutOfStock { .. } => "out-of-stock",
        }
    }
}

/// Verdict for one validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", content = "failure", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Valid,
    Invalid(ValidationFailure),
}

impl ValidationOutcome {
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// The failure, if any.
    pub fn failure(&self) -> Option<&ValidationFailure> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Invalid(failure) => Some(failure),
        }
    }
}

impl From<ValidationFailure> for ValidationOutcome {
    fn from(failure: ValidationFailure) -> Self {
        ValidationOutcome::Invalid(failure)
    }
}

// =============================================================================
// Gate 1: Completeness
// =============================================================================

/// Returns the names of required part types with no selected option.
///
/// `required` is expected in product order; names are reported in that order.
pub fn missing_required(required: &[PartType], selected: &[PartOption]) -> Vec<String> {
    let covered: HashSet<i64> = selected.iter().map(|o| o.part_type_id).collect();

    required
        .iter()
        .filter(|pt| pt.required && !covered.contains(&pt.id))
        .map(|pt| pt.name.clone())
        .collect()
}

/// Completeness gate.
pub fn check_completeness(
    required: &[PartType],
    selected: &[PartOption],
) -> Result<(), ValidationFailure> {
    let part_types = missing_required(required, selected);
    if part_types.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::MissingRequired { part_types })
    }
}

// =============================================================================
// Gate 2: Compatibility
// =============================================================================

/// Compatibility gate. `pairs` comes from
/// [`conflicting_pairs`](crate::compatibility::conflicting_pairs).
pub fn check_compatibility(pairs: Vec<(OptionId, OptionId)>) -> Result<(), ValidationFailure> {
    if pairs.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::IncompatibleCombination { pairs })
    }
}

// =============================================================================
// Gate 3: Availability
// =============================================================================

/// Availability gate. `option_ids` comes from
/// [`unavailable_options`](crate::inventory::unavailable_options).
pub fn check_availability(option_ids: Vec<OptionId>) -> Result<(), ValidationFailure> {
    if option_ids.is_empty() {
        Ok(())
    } else {
        Err(ValidationFailure::OutOfStock { option_ids })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
