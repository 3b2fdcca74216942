//! # Repository Module
//!
//! SQLite implementations of the velo-core store traits.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ConfigurationEngine                                                    │
//! │       │                                                                 │
//! │       │  catalog.options(&[102, 302])                                   │
//! │       ▼                                                                 │
//! │  CatalogRepository (impl CatalogStore)                                 │
//! │  ├── get_product / list_part_types                                     │
//! │  ├── list_active_options / get_options                                 │
//! │  └── list_edges / list_pricing_rules                                   │
//! │                                                                         │
//! │  InventoryRepository (impl InventoryStore)                             │
//! │  ├── get_records                                                       │
//! │  ├── decrement_one / decrement_all                                     │
//! │  └── restock                                                           │
//! │       │                                                                 │
//! │       │  Bound parameters only                                          │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod inventory;
