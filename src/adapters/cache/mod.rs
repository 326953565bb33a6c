//! In-memory result cache.
//!
//! Uses `moka` for TTL-based concurrent caching of finished transparency
//! results, keyed by `transparency_scores:{po_id}`.

pub mod moka_score_cache;

pub use moka_score_cache::MokaScoreCache;
