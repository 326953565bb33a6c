//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use uuid::Uuid;

use crate::domain::models::{CyclePolicy, EngineConfig, TraversalMode};

#[derive(Parser, Debug)]
#[command(name = "transparency")]
#[command(about = "Supply-chain transparency scoring (TTM/TTP) over purchase-order graphs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to .transparency/config.yaml + local.yaml + env)
    #[arg(short, long, global = true, env = "TRANSPARENCY_CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate TTM/TTP scores for a purchase order
    Calculate(CalculateArgs),

    /// List circular references reachable from a purchase order
    Cycles(CyclesArgs),

    /// Suggest how to improve a purchase order's transparency
    Suggest(SuggestArgs),

    /// Load and validate configuration, then print the effective values
    ValidateConfig,
}

/// Where purchase orders are read from.
#[derive(Args, Debug, Clone)]
pub struct FixtureArgs {
    /// Purchase-order fixture file (JSON, or YAML by .yaml/.yml extension)
    #[arg(short, long, env = "TRANSPARENCY_FIXTURE")]
    pub fixture: PathBuf,
}

/// Per-invocation overrides of the engine configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineOverrides {
    /// Traversal mode: depth_first, breadth_first or weighted
    #[arg(long, value_parser = parse_traversal_mode)]
    pub mode: Option<TraversalMode>,

    /// Cycle policy: break_at_first, degradation or weighted_average
    #[arg(long, value_parser = parse_cycle_policy)]
    pub policy: Option<CyclePolicy>,

    /// Maximum traversal depth (root = 0)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_depth: Option<u32>,

    /// Maximum number of paths per calculation
    #[arg(long)]
    pub max_paths: Option<usize>,
}

impl EngineOverrides {
    /// Apply the overrides on top of `config`.
    pub fn apply(&self, mut config: EngineConfig) -> EngineConfig {
        if let Some(mode) = self.mode {
            config.traversal_mode = mode;
        }
        if let Some(policy) = self.policy {
            config.cycle_policy = policy;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if let Some(max_paths) = self.max_paths {
            config.max_paths = max_paths.max(1);
        }
        config
    }
}

#[derive(Args, Debug)]
pub struct CalculateArgs {
    /// Root purchase order id
    pub po_id: Uuid,

    #[command(flatten)]
    pub source: FixtureArgs,

    #[command(flatten)]
    pub engine: EngineOverrides,

    /// Skip the result cache
    #[arg(long)]
    pub no_cache: bool,

    /// Also list alternative paths
    #[arg(long)]
    pub all_paths: bool,
}

#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// Purchase order id to start from
    pub po_id: Uuid,

    #[command(flatten)]
    pub source: FixtureArgs,
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Root purchase order id
    pub po_id: Uuid,

    #[command(flatten)]
    pub source: FixtureArgs,

    #[command(flatten)]
    pub engine: EngineOverrides,
}

fn parse_traversal_mode(value: &str) -> Result<TraversalMode, String> {
    TraversalMode::from_str(value).ok_or_else(|| {
        format!("unknown traversal mode '{value}' (expected depth_first, breadth_first or weighted)")
    })
}

fn parse_cycle_policy(value: &str) -> Result<CyclePolicy, String> {
    CyclePolicy::from_str(value).ok_or_else(|| {
        format!("unknown cycle policy '{value}' (expected break_at_first, degradation or weighted_average)")
    })
}
