//! Implementation of the `transparency suggest` command.

use anyhow::{Context, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::cli::commands::build_service;
use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::SuggestArgs;
use crate::domain::models::{Config, ImprovementSuggestion};

#[derive(Debug, Serialize)]
pub struct SuggestOutput {
    pub po_id: Uuid,
    pub suggestions: Vec<ImprovementSuggestion>,
}

impl CommandOutput for SuggestOutput {
    fn to_human(&self) -> String {
        if self.suggestions.is_empty() {
            return format!("No improvements suggested for {}", self.po_id);
        }
        format!(
            "Suggestions for {}:\n{}",
            self.po_id,
            TableFormatter::new().format_suggestions(&self.suggestions)
        )
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: SuggestArgs, config: &Config, json_mode: bool) -> Result<()> {
    let engine = args.engine.apply(config.engine.clone());
    let service = build_service(&args.source.fixture, engine, &config.cache, false)?;

    let suggestions = service
        .get_transparency_improvement_suggestions(args.po_id)
        .context("Failed to derive improvement suggestions")?;

    output(
        &SuggestOutput {
            po_id: args.po_id,
            suggestions,
        },
        json_mode,
    );
    Ok(())
}
