//! Management response interpretation.
//!
//! Structured replies render to DMR-style text (`{"outcome" => "success", ...}`)
//! or to the deployment-info listing table. Local-only sessions return plain
//! error text or nothing at all, so everything here must also work on free
//! text.

/// Result of one issued management command. Produced once per command,
/// immutable, consumed by the caller immediately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReply {
    /// Whether the command was accepted at the transport/CLI level. A
    /// server-side failed outcome still arrives with `accepted = true` and
    /// the failure encoded in `raw`.
    pub accepted: bool,
    /// `true` when the session could not marshal a structured response and
    /// only the boolean accept/reject is trustworthy.
    pub local_only: bool,
    /// Raw response text. Empty in local-only mode on success.
    pub raw: String,
}

impl CommandReply {
    /// Reply carrying a structured response body.
    #[must_use]
    pub fn structured(raw: impl Into<String>) -> Self {
        Self {
            accepted: true,
            local_only: false,
            raw: raw.into(),
        }
    }

    /// Local-only accept with no payload.
    #[must_use]
    pub fn local_accept() -> Self {
        Self {
            accepted: true,
            local_only: true,
            raw: String::new(),
        }
    }

    /// Local-only rejection carrying the CLI's error text.
    #[must_use]
    pub fn local_reject(raw: impl Into<String>) -> Self {
        Self {
            accepted: false,
            local_only: true,
            raw: raw.into(),
        }
    }
}

/// Error code the server reports when asked to undeploy something that is
/// not deployed.
pub const NOT_FOUND_CODE: &str = "WFLYCTL0216";

/// Marker a rendered structured response carries when the operation failed.
const FAILED_OUTCOME_MARKER: &str = "\"outcome\" => \"failed\"";

/// Whether a rendered structured response reports a failed outcome.
#[must_use]
pub fn indicates_failure(raw: &str) -> bool {
    raw.contains(FAILED_OUTCOME_MARKER)
}

/// Whether a rejected undeploy is the expected first-deployment case: the
/// server's not-found code together with the artifact name. Both conditions
/// must hold; a not-found for some *other* deployment is still fatal.
#[must_use]
pub fn is_benign_not_found(raw: &str, artifact_name: &str) -> bool {
    raw.contains(NOT_FOUND_CODE) && raw.contains(artifact_name)
}

/// Parse a deployment-info listing table into deployment names.
///
/// Returns `None` when the text is not recognizable as a listing table, in
/// which case callers fall back to substring matching.
#[must_use]
pub fn listed_deployments(raw: &str) -> Option<Vec<String>> {
    let mut lines = raw.lines().filter(|l| !l.trim().is_empty());
    let header = lines.next()?;
    let mut header_cols = header.split_whitespace();
    if header_cols.next() != Some("NAME") || !header.contains("RUNTIME-NAME") {
        return None;
    }
    Some(
        lines
            .filter_map(|line| line.split_whitespace().next())
            .map(str::to_string)
            .collect(),
    )
}

/// Whether `artifact_name` appears in a deployment listing response.
///
/// When the response parses as a listing table the name is matched exactly.
/// Otherwise this falls back to the historical substring match, which can
/// false-positive when one artifact's name is a substring of another's —
/// a documented approximation, not a bug to fix silently.
#[must_use]
pub fn artifact_listed(raw: &str, artifact_name: &str) -> bool {
    match listed_deployments(raw) {
        Some(names) => names.iter().any(|n| n == artifact_name),
        None => raw.contains(artifact_name),
    }
}
