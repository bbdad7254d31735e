//! Session mode detection.
//!
//! Some management connections cannot marshal structured responses back to
//! the caller; identical commands then carry different trust in their result
//! payload. One read-only listing command tells the two apart.

use crate::application::ports::ManagementSession;
use crate::domain::command;
use crate::domain::error::DeployError;

/// How much the session's replies can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Only a boolean accept/reject is available, no structured payload.
    LocalOnly,
    /// Full structured replies (standalone or managed domain).
    Structured,
}

/// Classify the session by issuing a diagnostic deployment listing, scoped
/// by server group when one is configured. No state is retained between
/// calls.
///
/// # Errors
///
/// Returns [`DeployError::Transport`] when the listing command cannot be
/// delivered.
pub async fn detect_mode(
    session: &mut impl ManagementSession,
    server_group: Option<&str>,
) -> Result<SessionMode, DeployError> {
    let reply = session
        .execute(&command::deployment_info(server_group))
        .await
        .map_err(|e| DeployError::Transport(format!("{e:#}")))?;
    Ok(if reply.local_only {
        SessionMode::LocalOnly
    } else {
        SessionMode::Structured
    })
}
