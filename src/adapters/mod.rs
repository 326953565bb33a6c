//! Adapters for the engine's ports.

pub mod cache;
pub mod memory;
