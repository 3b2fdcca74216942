//! # velo-db: SQLite Stores for the Velo Configurator
//!
//! Implements the velo-core [`CatalogStore`](velo_core::CatalogStore) and
//! [`InventoryStore`](velo_core::InventoryStore) traits on SQLite via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Velo Data Flow                                   │
//! │                                                                         │
//! │  ConfigurationEngine::validate_configuration(product, selections)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     velo-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories   │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                 │   │  (embedded)  │  │   │
//! │  │   │               │    │ CatalogRepo     │   │ 001_catalog  │  │   │
//! │  │   │ SqlitePool    │◄───│ InventoryRepo   │   │ 002_inventory│  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (VELO_DB_PATH, default ./velo.db)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - Pool configuration and environment loading
//! - [`pool`] - Connection pool and repository access
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Catalog and inventory repositories
//! - [`fixtures`] - Demo bicycle catalog
//!
//! ## Usage
//!
//! ```rust,ignore
//! use velo_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let engine = db.engine();
//! let outcome = engine.validate_configuration(1, &[102, 202, 301, 402, 501]).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod fixtures;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, DbConfig};
pub use error::{DbError, DbResult};
pub use pool::{Database, SqliteEngine};

pub use repository::catalog::CatalogRepository;
pub use repository::inventory::InventoryRepository;
