//! Implementation of the `transparency validate-config` command.

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::Config;

#[derive(Debug, Serialize)]
pub struct ValidateConfigOutput {
    pub valid: bool,
    pub source: String,
    pub config: Config,
}

impl CommandOutput for ValidateConfigOutput {
    fn to_human(&self) -> String {
        let engine = &self.config.engine;
        let cache = &self.config.cache;
        let logging = &self.config.logging;
        [
            format!("Configuration from {} is valid", self.source),
            format!("  engine.max_depth:         {}", engine.max_depth),
            format!("  engine.traversal_mode:    {}", engine.traversal_mode),
            format!("  engine.cycle_policy:      {}", engine.cycle_policy),
            format!("  engine.degradation_rate:  {}", engine.degradation_rate),
            format!("  engine.degradation_floor: {}", engine.degradation_floor),
            format!("  engine.max_paths:         {}", engine.max_paths),
            format!(
                "  cache:                    {} (ttl {}s, capacity {})",
                if cache.enabled { "enabled" } else { "disabled" },
                cache.ttl_seconds,
                cache.max_capacity
            ),
            format!(
                "  logging:                  {} / {}{}",
                logging.level,
                logging.format,
                logging
                    .log_dir
                    .as_ref()
                    .map(|d| format!(" -> {} ({})", d.display(), logging.rotation))
                    .unwrap_or_default()
            ),
        ]
        .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// The configuration was already loaded and validated by `main`; report it.
pub fn execute(config: &Config, source: &str, json_mode: bool) -> Result<()> {
    output(
        &ValidateConfigOutput {
            valid: true,
            source: source.to_string(),
            config: config.clone(),
        },
        json_mode,
    );
    Ok(())
}
