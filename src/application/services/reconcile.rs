//! Deployment reconciliation — the orchestrator for one run.
//!
//! Drives mode detection → existence check → conditional undeploy → deploy
//! against a single management session, and collapses every fatal condition
//! into the returned [`OperationOutcome`]. Nothing is retried; no fault
//! escapes to the caller.

use std::path::Path;

use crate::application::ports::{
    ArtifactStager, Endpoint, ManagementConnector, ManagementSession, ProgressReporter,
};
use crate::application::services::inspect;
use crate::application::services::mode::{self, SessionMode};
use crate::domain::command;
use crate::domain::error::DeployError;
use crate::domain::outcome::OperationOutcome;
use crate::domain::request::{DeploymentRequest, StagedArtifact};
use crate::domain::response::{self, CommandReply};

// ── Run log ───────────────────────────────────────────────────────────────────

/// Accumulates the run's log lines while forwarding them live to the
/// injected reporter.
struct RunLog<'a, R: ProgressReporter> {
    reporter: &'a R,
    lines: Vec<String>,
}

impl<'a, R: ProgressReporter> RunLog<'a, R> {
    fn new(reporter: &'a R) -> Self {
        Self {
            reporter,
            lines: Vec::new(),
        }
    }

    fn step(&mut self, message: &str) {
        self.reporter.step(message);
        self.lines.push(message.to_string());
    }

    fn success(&mut self, message: &str) {
        self.reporter.success(message);
        self.lines.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.reporter.warn(message);
        self.lines.push(format!("warning: {message}"));
    }

    fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run one deployment reconciliation.
///
/// The session and any staged artifact copy are owned by this run and
/// released on every exit path. Concurrent runs against the same server are
/// not serialized here; callers needing that guarantee must serialize
/// externally.
pub async fn reconcile(
    connector: &impl ManagementConnector,
    stager: &impl ArtifactStager,
    reporter: &impl ProgressReporter,
    request: &DeploymentRequest,
) -> OperationOutcome {
    let mut log = RunLog::new(reporter);
    match run(connector, stager, request, &mut log).await {
        Ok(()) => OperationOutcome::success(log.into_lines()),
        Err(err) => {
            let detail = err.to_string();
            log.warn(&detail);
            OperationOutcome::failure(log.into_lines(), detail)
        }
    }
}

async fn run(
    connector: &impl ManagementConnector,
    stager: &impl ArtifactStager,
    request: &DeploymentRequest,
    log: &mut RunLog<'_, impl ProgressReporter>,
) -> Result<(), DeployError> {
    let artifact = resolve_artifact(stager, request, log).await?;

    let result = run_against_server(connector, request, &artifact.path, log).await;

    // Staged copies are removed no matter how the run ended.
    if artifact.staged {
        match stager.cleanup(&artifact.path).await {
            Ok(()) => log.step(&format!(
                "removed staged copy {}",
                artifact.path.display()
            )),
            Err(err) => log.warn(&format!(
                "could not remove staged copy {}: {err:#}",
                artifact.path.display()
            )),
        }
    }

    result
}

/// Resolve the archive to a readable path, staging it when it originates on
/// a remote build agent. Failures here happen before any network attempt.
async fn resolve_artifact(
    stager: &impl ArtifactStager,
    request: &DeploymentRequest,
    log: &mut RunLog<'_, impl ProgressReporter>,
) -> Result<StagedArtifact, DeployError> {
    if request.local_path().is_none() {
        log.step(&format!("staging {}", request.archive.describe()));
    }
    let artifact = stager
        .stage(&request.archive)
        .await
        .map_err(|e| DeployError::ArtifactNotFound(format!("{e:#}")))?;
    if artifact.staged {
        log.success(&format!("staged to {}", artifact.path.display()));
    }
    Ok(artifact)
}

/// Connect, drive the flow, and close the session exactly once.
async fn run_against_server(
    connector: &impl ManagementConnector,
    request: &DeploymentRequest,
    archive_path: &Path,
    log: &mut RunLog<'_, impl ProgressReporter>,
) -> Result<(), DeployError> {
    let endpoint = Endpoint {
        host: &request.host,
        port: request.port,
        credentials: request
            .credentials
            .as_ref()
            .map(|c| (c.username.as_str(), c.password.as_str())),
    };

    let mut session =
        connector
            .connect(&endpoint)
            .await
            .map_err(|e| DeployError::Connection {
                endpoint: endpoint.controller(),
                detail: format!("{e:#}"),
            })?;
    log.success(&format!(
        "Connected to WildFly at {}",
        endpoint.controller()
    ));

    let flow = drive(&mut session, request, archive_path, log).await;

    if let Err(err) = session.close().await {
        log.warn(&format!("error while closing management session: {err:#}"));
    }

    flow
}

/// Pick and run the flow for the detected session mode.
async fn drive(
    session: &mut impl ManagementSession,
    request: &DeploymentRequest,
    archive_path: &Path,
    log: &mut RunLog<'_, impl ProgressReporter>,
) -> Result<(), DeployError> {
    let group = request.server_group.as_deref();
    match mode::detect_mode(session, group).await? {
        SessionMode::LocalOnly => {
            log.warn("local-only management session: no server return message available");
            local_flow(session, request, archive_path, log).await
        }
        SessionMode::Structured => {
            log.step("management session mode: structured");
            structured_flow(session, request, archive_path, log).await
        }
    }
}

// ── Local-only flow ───────────────────────────────────────────────────────────

/// Without structured replies the existence check is unreliable, so the
/// undeploy is attempted unconditionally. A rejection carrying the server's
/// not-found code together with the artifact name is the expected case on
/// first deployment and downgrades to a warning.
async fn local_flow(
    session: &mut impl ManagementSession,
    request: &DeploymentRequest,
    archive_path: &Path,
    log: &mut RunLog<'_, impl ProgressReporter>,
) -> Result<(), DeployError> {
    let name = &request.artifact_name;
    let group = request.server_group.as_deref();

    log.step(&format!("trying to undeploy {name}"));
    let reply = execute(session, &command::undeploy(name, group)).await?;
    if reply.accepted {
        log.success(&format!("undeployed {name}"));
    } else if response::is_benign_not_found(&reply.raw, name) {
        log.warn(&format!("{name} was not deployed yet, continuing"));
    } else {
        return Err(DeployError::Rejected {
            operation: "undeploy",
            response: reply.raw,
        });
    }

    log.step(&format!("deploying {name}"));
    let reply = execute(
        session,
        &command::deploy(&archive_path.to_string_lossy(), group),
    )
    .await?;
    if !reply.accepted {
        return Err(DeployError::Rejected {
            operation: "deploy",
            response: reply.raw,
        });
    }
    log.success(&format!("deployed {name}"));
    Ok(())
}

// ── Structured flow ───────────────────────────────────────────────────────────

async fn structured_flow(
    session: &mut impl ManagementSession,
    request: &DeploymentRequest,
    archive_path: &Path,
    log: &mut RunLog<'_, impl ProgressReporter>,
) -> Result<(), DeployError> {
    let name = &request.artifact_name;
    let group = request.server_group.as_deref();

    if inspect::is_deployed(session, name, group).await? {
        log.step(&format!("application {name} exists, undeploying"));
        let reply = execute(session, &command::undeploy(name, group)).await?;
        check_structured(&reply, "undeploy")?;
        log.success(&format!("undeployed {name}"));
    } else {
        log.step(&format!("application {name} is not deployed"));
    }

    log.step(&format!("deploying {name}"));
    let reply = execute(
        session,
        &command::deploy(&archive_path.to_string_lossy(), group),
    )
    .await?;
    check_structured(&reply, "deploy")?;
    log.success(&format!("deployed {name}"));
    Ok(())
}

/// A structured reply fails the run when it was rejected outright or its
/// rendered response text carries the failed-outcome marker.
fn check_structured(reply: &CommandReply, operation: &'static str) -> Result<(), DeployError> {
    if !reply.accepted || response::indicates_failure(&reply.raw) {
        return Err(DeployError::Rejected {
            operation,
            response: reply.raw.clone(),
        });
    }
    Ok(())
}

async fn execute(
    session: &mut impl ManagementSession,
    command_text: &str,
) -> Result<CommandReply, DeployError> {
    session
        .execute(command_text)
        .await
        .map_err(|e| DeployError::Transport(format!("{e:#}")))
}
