//! Domain layer for the transparency engine
//!
//! This module contains the value model and the port traits through which
//! the engine reaches purchase-order data and the result cache.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
