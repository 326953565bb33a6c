//! CLI output formatting module
//!
//! Commands render through [`CommandOutput`]: a human-readable form for the
//! terminal and a JSON form for `--json`.

pub mod table;

use serde::Serialize;

pub use table::TableFormatter;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result.to_json()).unwrap_or_default());
    } else {
        println!("{}", result.to_human());
    }
}

/// Format a score in `[0, 1]` with two decimals.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}
