//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - JSON or pretty console formatting
//! - Optional rolling JSON log files via tracing-appender

pub mod logger;

pub use logger::{LogFormat, LoggerImpl, RotationPolicy};
