//! Shared test helpers: canned management replies and request constructors.

#![allow(dead_code)]
#![allow(clippy::expect_used)]

use wfdeploy::domain::request::DeploymentRequest;
use wfdeploy::domain::response::CommandReply;

// ── Reply constructors ────────────────────────────────────────────────────────

/// Structured success reply (`{"outcome" => "success"}`).
pub fn structured_ok() -> CommandReply {
    CommandReply::structured(r#"{"outcome" => "success"}"#)
}

/// Structured reply whose rendered text carries the failed-outcome marker.
pub fn structured_failed(description: &str) -> CommandReply {
    CommandReply::structured(format!(
        r#"{{"outcome" => "failed", "failure-description" => "{description}"}}"#
    ))
}

/// Deployment-info listing table naming the given deployments.
pub fn listing(names: &[&str]) -> CommandReply {
    let mut table = String::from("NAME      RUNTIME-NAME  PERSISTENT  ENABLED  STATUS\n");
    for name in names {
        table.push_str(&format!("{name}  {name}  true  true  OK\n"));
    }
    CommandReply::structured(table)
}

/// Local-only accept (empty response).
pub fn local_accept() -> CommandReply {
    CommandReply::local_accept()
}

/// Local-only rejection carrying the given error text.
pub fn local_reject(text: &str) -> CommandReply {
    CommandReply::local_reject(text)
}

// ── Request constructors ──────────────────────────────────────────────────────

/// A valid request against `wildfly.internal:9990` with no credentials.
pub fn request(archive: &str, server_group: Option<&str>) -> DeploymentRequest {
    DeploymentRequest::new(archive, "wildfly.internal", 9990, None, None, server_group)
        .expect("valid request")
}
