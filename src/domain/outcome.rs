//! Terminal outcome value returned to the caller of a deployment run.

use serde::Serialize;

/// Final result of one reconciliation run. Never mutated after construction.
#[derive(Debug, Serialize)]
pub struct OperationOutcome {
    pub succeeded: bool,
    /// Ordered log lines accumulated during the run.
    pub log_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl OperationOutcome {
    #[must_use]
    pub fn success(log_lines: Vec<String>) -> Self {
        Self {
            succeeded: true,
            log_lines,
            error_detail: None,
        }
    }

    #[must_use]
    pub fn failure(log_lines: Vec<String>, error_detail: String) -> Self {
        Self {
            succeeded: false,
            log_lines,
            error_detail: Some(error_detail),
        }
    }
}
