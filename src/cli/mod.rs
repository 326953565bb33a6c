//! Command-line interface.
//!
//! Commands load purchase orders from a fixture file, run the transparency
//! service and render the outcome as text tables or JSON.

pub mod commands;
pub mod output;
pub mod types;

use serde_json::json;

use crate::domain::errors::DomainError;

pub use types::{Cli, Commands};

/// Exit status for configuration, input or usage errors.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status when the calculation itself failed, as opposed to a
/// legitimate zero-transparency result.
pub const EXIT_CALCULATION_FAILED: i32 = 2;

/// Report `err` on stderr (or as JSON on stdout) and return the exit status.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> i32 {
    let (kind, code) = if err.downcast_ref::<DomainError>().is_some() {
        ("calculation_failed", EXIT_CALCULATION_FAILED)
    } else {
        ("error", EXIT_FAILURE)
    };

    if json_mode {
        println!(
            "{}",
            json!({ "error": format!("{err:#}"), "kind": kind })
        );
    } else if code == EXIT_CALCULATION_FAILED {
        eprintln!("Calculation failed: {err:#}");
    } else {
        eprintln!("Error: {err:#}");
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_are_calculation_failures() {
        let err = anyhow::Error::new(DomainError::ProviderFailure("timeout".to_string()))
            .context("Failed to calculate transparency scores");
        assert_eq!(handle_error(&err, true), EXIT_CALCULATION_FAILED);
    }

    #[test]
    fn test_other_errors_are_general_failures() {
        let err = anyhow::anyhow!("fixture not found");
        assert_eq!(handle_error(&err, false), EXIT_FAILURE);

        let cache = anyhow::Error::new(DomainError::CacheFailure("store offline".to_string()));
        assert_eq!(handle_error(&cache, false), EXIT_CALCULATION_FAILED);
    }
}
