//! In-memory purchase-order store.
//!
//! Backs both engine ports from a fixed set of purchase orders, loaded from a
//! JSON or YAML fixture file. Used by the CLI and by tests.

pub mod purchase_order_store;

pub use purchase_order_store::InMemoryPurchaseOrderStore;
