//! Deployment listing inspection.

use crate::application::ports::ManagementSession;
use crate::domain::command;
use crate::domain::error::DeployError;
use crate::domain::response;

/// Whether `artifact_name` is currently deployed, scoped by server group
/// when one is configured.
///
/// Matching is exact when the listing parses as a table and a substring
/// scan otherwise — see [`response::artifact_listed`] for the caveat.
///
/// # Errors
///
/// Returns [`DeployError::Transport`] when the command cannot be delivered
/// and [`DeployError::Query`] when the server rejects the listing.
pub async fn is_deployed(
    session: &mut impl ManagementSession,
    artifact_name: &str,
    server_group: Option<&str>,
) -> Result<bool, DeployError> {
    let reply = session
        .execute(&command::deployment_info(server_group))
        .await
        .map_err(|e| DeployError::Transport(format!("{e:#}")))?;
    if !reply.accepted {
        return Err(DeployError::Query(reply.raw));
    }
    Ok(response::artifact_listed(&reply.raw, artifact_name))
}
