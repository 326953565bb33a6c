//! Implementation of the `transparency calculate` command.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::cli::commands::build_service;
use crate::cli::output::{format_score, output, CommandOutput, TableFormatter};
use crate::cli::types::CalculateArgs;
use crate::domain::models::{Config, TransparencyResult};

#[derive(Debug, Serialize)]
pub struct CalculateOutput {
    #[serde(flatten)]
    pub result: TransparencyResult,
    #[serde(skip)]
    pub show_alternatives: bool,
}

impl CommandOutput for CalculateOutput {
    fn to_human(&self) -> String {
        let r = &self.result;
        let formatter = TableFormatter::new();
        let mut lines = vec![
            format!("Transparency for purchase order {}", r.po_id),
            format!("  TTM:          {}", format_score(r.ttm_score)),
            format!("  TTP:          {}", format_score(r.ttp_score)),
            format!(
                "  Confidence:   {} ({})",
                format_score(r.confidence_level),
                r.confidence_band()
            ),
            format!(
                "  Traced:       {:.2}% (untraced {:.2}%)",
                r.traced_percentage, r.untraced_percentage
            ),
            format!(
                "  Nodes: {}  Paths: {}  Circular refs: {}  Data gaps: {}",
                r.total_nodes_analyzed,
                r.alternative_paths.len() + usize::from(!r.primary_path.is_empty()),
                r.circular_references_detected,
                r.data_gaps_identified
            ),
        ];

        if !r.primary_path.is_empty() {
            lines.push("\nPrimary path:".to_string());
            lines.push(formatter.format_path(&r.primary_path));
        }

        if self.show_alternatives {
            for (i, path) in r.alternative_paths.iter().enumerate() {
                lines.push(format!("\nAlternative path {}:", i + 1));
                lines.push(formatter.format_path(path));
            }
        }

        if !r.critical_gaps.is_empty() {
            lines.push("\nCritical gaps:".to_string());
            lines.extend(r.critical_gaps.iter().map(|g| format!("  - {g}")));
        }

        lines.push(format!(
            "\nCalculated in {:.2} ms",
            r.calculation_duration_ms
        ));
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: CalculateArgs, config: &Config, json_mode: bool) -> Result<()> {
    let engine = args.engine.apply(config.engine.clone());
    let service = build_service(&args.source.fixture, engine, &config.cache, !args.no_cache)?;

    let result = service
        .calculate_transparency_scores(args.po_id, !args.no_cache)
        .context("Failed to calculate transparency scores")?;

    output(
        &CalculateOutput {
            result,
            show_alternatives: args.all_paths,
        },
        json_mode,
    );
    Ok(())
}
