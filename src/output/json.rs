//! JSON output helpers.

use anyhow::{Context, Result};

use crate::domain::outcome::OperationOutcome;

/// Render an outcome for `--json` mode (pretty-printed).
///
/// # Errors
///
/// Returns an error if JSON serialization fails (should not happen in
/// practice — the outcome contains only booleans and strings).
pub fn render_outcome(outcome: &OperationOutcome) -> Result<String> {
    serde_json::to_string_pretty(outcome).context("JSON serialization failed")
}
