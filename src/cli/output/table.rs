//! Table output formatting for CLI commands
//!
//! Renders paths, suggestions and cycles with comfy-table. Honours
//! `NO_COLOR` and dumb terminals.

use std::env;

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};

use crate::cli::output::format_score;
use crate::domain::models::{ImprovementSuggestion, Path, SuggestionPriority};
use crate::services::CycleImpact;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// One row per node, root first.
    pub fn format_path(&self, path: &Path) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&[
            "Depth", "PO", "Company", "TTM", "TTP", "Confidence", "Degradation", "Circular",
        ]));

        for node in &path.nodes {
            let circular = if node.is_circular {
                self.colored("yes", Color::Yellow)
            } else {
                Cell::new("-")
            };
            table.add_row(vec![
                Cell::new(node.depth),
                Cell::new(&node.po_number),
                Cell::new(node.company_type),
                self.score_cell(node.base_ttm_score),
                self.score_cell(node.base_ttp_score),
                self.score_cell(node.confidence_level),
                Cell::new(format_score(node.degradation_factor)),
                circular,
            ]);
        }

        table.to_string()
    }

    pub fn format_suggestions(&self, suggestions: &[ImprovementSuggestion]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Priority", "Category", "Impact", "Effort", "Description"]));

        for suggestion in suggestions {
            let priority = match suggestion.priority {
                SuggestionPriority::High => self.colored(suggestion.priority, Color::Red),
                SuggestionPriority::Medium => self.colored(suggestion.priority, Color::Yellow),
                SuggestionPriority::Low => Cell::new(suggestion.priority),
            };
            table.add_row(vec![
                priority,
                Cell::new(&suggestion.category),
                Cell::new(format_score(suggestion.impact_estimate)),
                Cell::new(suggestion.effort_estimate),
                Cell::new(&suggestion.description),
            ]);
        }

        table.to_string()
    }

    pub fn format_cycles(&self, cycles: &[CycleImpact]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Length", "Severity", "Purchase orders"]));

        for cycle in cycles {
            let ids = cycle
                .po_ids
                .iter()
                .map(|id| short_id(&id.to_string()))
                .collect::<Vec<_>>()
                .join(" → ");
            table.add_row(vec![
                Cell::new(cycle.length),
                Cell::new(format!("{:?}", cycle.severity).to_lowercase()),
                Cell::new(ids),
            ]);
        }

        table.to_string()
    }

    fn score_cell(&self, score: f64) -> Cell {
        let color = match score {
            s if s >= 0.8 => Color::Green,
            s if s >= 0.5 => Color::Yellow,
            _ => Color::Red,
        };
        self.colored(format_score(score), color)
    }

    fn colored(&self, content: impl ToString, color: Color) -> Cell {
        let cell = Cell::new(content);
        if self.use_colors {
            cell.fg(color)
        } else {
            cell
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();

        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Check if color output is supported
fn supports_color() -> bool {
    // Respect NO_COLOR environment variable
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}
