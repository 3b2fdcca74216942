//! # Error Types
//!
//! Domain-specific error types for velo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  velo-core errors (this file)                                          │
//! │  ├── CoreError        - Request failures (not found, bad input, store) │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  NOT an error: ValidationFailure (configuration module)                │
//! │  └── A purchasable/unpurchasable verdict, returned as a value          │
//! │                                                                         │
//! │  velo-db errors (separate crate)                                       │
//! │  └── DbError          - Database failures, wrapped as DataAccess       │
//! │                                                                         │
//! │  Flow: DbError → CoreError::DataAccess → caller aborts the request     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending ids in error messages
//! 3. Store failures keep the original error as `source()`, never a String

use thiserror::Error;

use crate::types::{OptionId, PartTypeId, ProductId};

/// Boxed collaborator error carried by [`CoreError::DataAccess`].
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

// =============================================================================
// Core Error
// =============================================================================

/// Errors that abort an engine request.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not exist.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Part type does not exist or is not offered on the product.
    #[error("Part type {part_type_id} not found on product {product_id}")]
    PartTypeNotFound {
        product_id: ProductId,
        part_type_id: PartTypeId,
    },

    /// Part option id does not exist or has been deactivated.
    #[error("Part option not found: {0}")]
    PartOptionNotFound(OptionId),

    /// The option belongs to a part type the product does not offer.
    ///
    /// ## When This Occurs
    /// - A stale UI sends a selection from another product
    /// - A part type was removed from the product mid-session
    #[error("Part option {option_id} is not offered on product {product_id}")]
    OptionNotOffered {
        option_id: OptionId,
        product_id: ProductId,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Catalog or inventory store failed.
    ///
    /// The collaborator's error is kept intact; the engine performs no retries.
    #[error("Data access failed: {0}")]
    DataAccess(#[source] StoreError),
}

impl CoreError {
    /// Wraps a store failure.
    pub fn data_access(err: impl Into<StoreError>) -> Self {
        CoreError::DataAccess(err.into())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These reject malformed requests before any store access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Duplicate value (e.g., same option selected twice).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
