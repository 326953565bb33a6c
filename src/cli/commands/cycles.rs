//! Implementation of the `transparency cycles` command.

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::commands::build_service;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::CyclesArgs;
use crate::domain::models::Config;
use crate::services::CycleImpactReport;

#[derive(Debug, Serialize)]
pub struct CyclesOutput {
    pub po_id: Uuid,
    pub circular_po_ids: Vec<Uuid>,
    pub report: CycleImpactReport,
}

impl CommandOutput for CyclesOutput {
    fn to_human(&self) -> String {
        if self.report.cycles.is_empty() {
            return format!("No circular references reachable from {}", self.po_id);
        }

        let mut lines = vec![
            format!(
                "{} cycle(s) reachable from {} involving {} purchase order(s)",
                self.report.cycles.len(),
                self.po_id,
                self.circular_po_ids.len()
            ),
            TableFormatter::new().format_cycles(&self.report.cycles),
            format!("Total quantity in cycles: {:.2}", self.report.total_quantity),
            format!(
                "Companies affected: {}  Products affected: {}",
                self.report.affected_companies.len(),
                self.report.affected_products.len()
            ),
        ];
        if let Some(severity) = self.report.highest_severity() {
            lines.push(format!("Highest severity: {severity:?}").to_lowercase());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: CyclesArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = build_service(&args.source.fixture, config.engine.clone(), &config.cache, false)?;

    let circular_po_ids = service
        .detect_circular_references(args.po_id)
        .context("Failed to detect circular references")?;
    let report = service
        .analyze_cycles(args.po_id)
        .context("Failed to analyze cycle impact")?;

    output(
        &CyclesOutput {
            po_id: args.po_id,
            circular_po_ids,
            report,
        },
        json_mode,
    );
    Ok(())
}
