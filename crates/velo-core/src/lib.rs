//! # velo-core: Configuration Resolution & Pricing
//!
//! Decides which part options a customer may still pick for a configurable
//! product, what each one costs given the current selection, and whether a
//! finished configuration can be bought.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Velo Configurator Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Callers: UI backend, cart, checkout                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ velo-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐ │   │
//! │  │   │compatibility│  │ inventory │  │  pricing  │  │configura-│ │   │
//! │  │   │  resolver   │  │   gate    │  │  engine   │  │tion valid│ │   │
//! │  │   └─────────────┘  └───────────┘  └───────────┘  └──────────┘ │   │
//! │  │                  ▲ ConfigurationEngine ▲                        │   │
//! │  │                  │   CatalogStore      │ InventoryStore         │   │
//! │  └──────────────────┼─────────────────────┼────────────────────────┘   │
//! │                     │                     │                             │
//! │  ┌──────────────────▼─────────────────────▼────────────────────────┐   │
//! │  │   velo-db (SQLite repositories)  /  memory::InMemoryStore       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog and inventory types
//! - [`money`] - Integer cents and basis-point percentages
//! - [`compatibility`] - Bidirectional incompatibility filtering
//! - [`inventory`] - Stock annotation and availability
//! - [`pricing`] - Conditional price adjustments
//! - [`configuration`] - Completeness, compatibility and stock gates
//! - [`engine`] - Entry points over the store traits
//! - [`store`] - Catalog and inventory traits
//! - [`memory`] - In-memory store implementation
//!
//! The rule functions are pure. Only [`engine`] touches the stores, and only
//! through the traits in [`store`].
//!
//! ## Example Usage
//!
//! ```rust
//! use velo_core::money::{Money, Percentage};
//!
//! // 160.00 with a +10% rule
//! let total = Money::from_cents(16_000).apply_percentage(Percentage::from_percent(10));
//! assert_eq!(total.cents(), 17_600);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod compatibility;
pub mod configuration;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod memory;
pub mod money;
pub mod pricing;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use configuration::{ValidationFailure, ValidationOutcome};
pub use engine::{AvailableOption, ConfigurationEngine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Percentage};
pub use pricing::{ConfigurationPrice, OptionPrice};
pub use store::{CatalogStore, InventoryStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum option ids accepted in one selection.
///
/// A product has one slot per part type, so real selections stay far below
/// this. Larger inputs are rejected before any store access.
pub const MAX_SELECTION_SIZE: usize = 64;
