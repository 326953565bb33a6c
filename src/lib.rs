//! Transparency Engine - supply-chain transparency scoring
//!
//! Computes how much of a purchase order's material inputs can be traced back
//! to processors ("Transparency to Mill", TTM) and to raw-material originators
//! ("Transparency to Plantation", TTP), with a confidence level, by walking
//! the graph of purchase orders linked through declared input materials.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): value model and port traits
//! - **Service Layer** (`services`): traversal, scoring, aggregation, orchestration
//! - **Adapters** (`adapters`): in-memory purchase-order store, moka result cache
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use transparency_engine::adapters::memory::InMemoryPurchaseOrderStore;
//! use transparency_engine::domain::models::EngineConfig;
//! use transparency_engine::services::TransparencyEngine;
//!
//! # fn main() -> anyhow::Result<()> {
//! let store = InMemoryPurchaseOrderStore::load("orders.json")?;
//! let engine = TransparencyEngine::new(EngineConfig::default());
//! let result = engine.calculate(uuid::Uuid::nil(), &store)?;
//! println!("TTM {:.2} TTP {:.2}", result.ttm_score, result.ttp_score);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::cache::MokaScoreCache;
pub use adapters::memory::InMemoryPurchaseOrderStore;
pub use domain::models::{
    CacheConfig, Config, CyclePolicy, EngineConfig, ImprovementSuggestion, LoggingConfig, Node,
    Path, PurchaseOrder, TransparencyResult, TraversalMode,
};
pub use domain::ports::{MaterialsLookup, PoDetailProvider, ScoreCache};
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{CycleDetector, TransparencyEngine, TransparencyService};
