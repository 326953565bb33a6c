use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Directory holding project configuration, relative to the working directory.
pub const CONFIG_DIR: &str = ".transparency";

/// Prefix for environment variable overrides (`TRANSPARENCY_ENGINE__MAX_DEPTH=4`).
pub const ENV_PREFIX: &str = "TRANSPARENCY_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_depth: {0}. Must be at least 1")]
    InvalidMaxDepth(u32),

    #[error("Invalid degradation_rate: {0}. Must be strictly between 0 and 1")]
    InvalidDegradationRate(f64),

    #[error("Invalid degradation_floor: {0}. Must be in (0, 1]")]
    InvalidDegradationFloor(f64),

    #[error("Invalid max_paths: {0}. Must be at least 1")]
    InvalidMaxPaths(usize),

    #[error("Invalid ttl_seconds: {0}. Must be at least 1 when the cache is enabled")]
    InvalidCacheTtl(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidLogRotation(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .transparency/config.yaml (project config)
    /// 3. .transparency/local.yaml (local overrides, optional)
    /// 4. Environment variables (TRANSPARENCY_* prefix, `__` separates sections)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(Path::new("."))
    }

    /// Same hierarchy as [`ConfigLoader::load`], rooted at `base_dir`.
    pub fn load_from_dir(base_dir: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Self::figment(base_dir.as_ref(), ENV_PREFIX)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment(base_dir: &Path, env_prefix: &str) -> Figment {
        let config_dir = base_dir.join(CONFIG_DIR);
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(config_dir.join("config.yaml")))
            .merge(Yaml::file(config_dir.join("local.yaml")))
            .merge(Env::prefixed(env_prefix).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let engine = &config.engine;
        if engine.max_depth == 0 {
            return Err(ConfigError::InvalidMaxDepth(engine.max_depth));
        }

        if !(engine.degradation_rate > 0.0 && engine.degradation_rate < 1.0) {
            return Err(ConfigError::InvalidDegradationRate(engine.degradation_rate));
        }

        if !(engine.degradation_floor > 0.0 && engine.degradation_floor <= 1.0) {
            return Err(ConfigError::InvalidDegradationFloor(engine.degradation_floor));
        }

        if engine.max_paths == 0 {
            return Err(ConfigError::InvalidMaxPaths(engine.max_paths));
        }

        if config.cache.enabled && config.cache.ttl_seconds == 0 {
            return Err(ConfigError::InvalidCacheTtl(config.cache.ttl_seconds));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.as_str()) {
            return Err(ConfigError::InvalidLogRotation(
                config.logging.rotation.clone(),
            ));
        }

        Ok(())
    }
}
