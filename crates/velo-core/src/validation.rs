//! # Validation Module
//!
//! Input validation for engine requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE - request shape                                  │
//! │  ├── ids positive, no option selected twice                            │
//! │  └── Rejected with CoreError::Validation (malformed request)           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: configuration module - business verdict                      │
//! │  ├── completeness, compatibility, availability                         │
//! │  └── Returned as ValidationOutcome::Invalid (a value, not an error)    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK (quantity >= 0)                                             │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::OptionId;
use crate::MAX_SELECTION_SIZE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a selection of option ids.
///
/// ## Rules
/// - Every id must be positive
/// - No id may appear twice
/// - At most `MAX_SELECTION_SIZE` ids
///
/// An empty selection is valid input (a configuration just started).
///
/// ## Example
/// ```rust
/// use velo_core::validation::validate_selection;
///
/// assert!(validate_selection(&[]).is_ok());
/// assert!(validate_selection(&[1, 5, 9]).is_ok());
/// assert!(validate_selection(&[1, 1]).is_err());
/// ```
pub fn validate_selection(selection: &[OptionId]) -> ValidationResult<()> {
    if selection.len() > MAX_SELECTION_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "selection size".to_string(),
            min: 0,
            max: MAX_SELECTION_SIZE as i64,
        });
    }

    let mut seen = HashSet::with_capacity(selection.len());
    for &id in selection {
        validate_id("option id", id)?;
        if !seen.insert(id) {
            return Err(ValidationError::Duplicate {
                field: "option id".to_string(),
                value: id.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a primary key.
pub fn validate_id(field: &str, id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an inventory decrement quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
