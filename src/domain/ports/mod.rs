//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the synchronous interfaces the engine consumes:
//! - PoDetailProvider: purchase-order detail lookup
//! - MaterialsLookup: input-material lookup used by cycle detection
//! - ScoreCache: memoisation of finished results
//!
//! The engine never performs I/O itself; any blocking happens inside the
//! adapter behind one of these traits.

pub mod materials_lookup;
pub mod null_cache;
pub mod po_detail_provider;
pub mod score_cache;

pub use materials_lookup::MaterialsLookup;
pub use null_cache::NullScoreCache;
pub use po_detail_provider::PoDetailProvider;
pub use score_cache::{cache_key, ScoreCache};
