//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Request validation errors ─────────────────────────────────────────────────

/// Errors raised while constructing a [`crate::domain::request::DeploymentRequest`].
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("no archive path was given")]
    EmptyArchive,

    #[error("archive path '{0}' has no filename component")]
    NoArtifactName(String),

    #[error("no management host was given")]
    EmptyHost,

    #[error("management port must be between 1 and 65535")]
    PortOutOfRange,

    #[error("username and password must be supplied together")]
    UnpairedCredentials,
}

// ── Reconciliation errors ─────────────────────────────────────────────────────

/// Fatal error kinds produced during a deployment run.
///
/// Every variant collapses into an `OperationOutcome` with
/// `succeeded = false`; none of them escapes the reconciler. The benign
/// not-found case on a local-mode undeploy is recovered in-flow and is
/// deliberately not a variant here.
#[derive(Debug, Error)]
pub enum DeployError {
    /// The archive is missing at its resolved path. Raised before any
    /// connection attempt.
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),

    /// The management session could not be established.
    #[error("cannot connect to {endpoint}: {detail}")]
    Connection { endpoint: String, detail: String },

    /// The transport failed mid-command (connection loss, malformed reply,
    /// timeout).
    #[error("management transport failed: {0}")]
    Transport(String),

    /// The deployment listing was rejected by the server.
    #[error("deployment listing failed: {0}")]
    Query(String),

    /// The server explicitly reported a failed outcome for an undeploy or
    /// deploy command. The detail is the server's response text.
    #[error("{operation} rejected by server: {response}")]
    Rejected {
        operation: &'static str,
        response: String,
    },
}
