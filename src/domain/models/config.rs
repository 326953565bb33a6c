use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::policy::{CyclePolicy, TraversalMode};

/// Main configuration structure for the transparency engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Traversal and scoring configuration
    #[serde(default)]
    pub engine: EngineConfig,

    /// Result cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Traversal and cycle-handling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EngineConfig {
    /// Deepest node depth a traversal may reach (root = 0)
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Traversal strategy
    #[serde(default)]
    pub traversal_mode: TraversalMode,

    /// Cycle handling policy
    #[serde(default)]
    pub cycle_policy: CyclePolicy,

    /// Multiplier applied to degradation factors per cycle event
    #[serde(default = "default_degradation_rate")]
    pub degradation_rate: f64,

    /// Lowest value a degradation factor may reach
    #[serde(default = "default_degradation_floor")]
    pub degradation_floor: f64,

    /// Ceiling on the number of paths a single traversal may create
    #[serde(default = "default_max_paths")]
    pub max_paths: usize,
}

const fn default_max_depth() -> u32 {
    10
}

const fn default_degradation_rate() -> f64 {
    0.8
}

const fn default_degradation_floor() -> f64 {
    0.1
}

const fn default_max_paths() -> usize {
    512
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            traversal_mode: TraversalMode::default(),
            cycle_policy: CyclePolicy::default(),
            degradation_rate: default_degradation_rate(),
            degradation_floor: default_degradation_floor(),
            max_paths: default_max_paths(),
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CacheConfig {
    /// Whether results are cached at all
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Time-to-live for cached results
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Maximum number of cached results
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

const fn default_cache_enabled() -> bool {
    true
}

const fn default_ttl_seconds() -> u64 {
    3600
}

const fn default_max_capacity() -> u64 {
    10_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_ttl_seconds(),
            max_capacity: default_max_capacity(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files (stdout only when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.traversal_mode, TraversalMode::DepthFirst);
        assert_eq!(config.cycle_policy, CyclePolicy::Degradation);
        assert!((config.degradation_rate - 0.8).abs() < f64::EPSILON);
        assert!((config.degradation_floor - 0.1).abs() < f64::EPSILON);
        assert_eq!(config.max_paths, 512);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r"
engine:
  max_depth: 4
  cycle_policy: weighted_average
cache:
  enabled: false
";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.engine.max_depth, 4);
        assert_eq!(config.engine.cycle_policy, CyclePolicy::WeightedAverage);
        assert_eq!(config.engine.traversal_mode, TraversalMode::DepthFirst);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.logging.level, "info");
    }
}
