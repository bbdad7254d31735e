//! Management command text builders.
//!
//! The management CLI scopes deploy/undeploy with `--server-groups` (plural)
//! but deployment-info with `--server-group` (singular). The asymmetry is the
//! server's, not ours.

/// `deploy <path> [--server-groups=<g>]`
#[must_use]
pub fn deploy(archive_path: &str, server_group: Option<&str>) -> String {
    match server_group {
        Some(group) => format!("deploy {archive_path} --server-groups={group}"),
        None => format!("deploy {archive_path}"),
    }
}

/// `undeploy <name> [--server-groups=<g>]`
#[must_use]
pub fn undeploy(artifact_name: &str, server_group: Option<&str>) -> String {
    match server_group {
        Some(group) => format!("undeploy {artifact_name} --server-groups={group}"),
        None => format!("undeploy {artifact_name}"),
    }
}

/// `deployment-info [--server-group=<g>]`
#[must_use]
pub fn deployment_info(server_group: Option<&str>) -> String {
    match server_group {
        Some(group) => format!("deployment-info --server-group={group}"),
        None => "deployment-info".to_string(),
    }
}
