//! Port trait definitions for the application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` — never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::request::{ArtifactSource, StagedArtifact};
use crate::domain::response::CommandReply;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Coordinates of a management endpoint for one connection attempt.
pub struct Endpoint<'a> {
    /// Management interface hostname.
    pub host: &'a str,
    /// Management interface port, e.g. `9990`.
    pub port: u16,
    /// Optional `(username, password)` pair. `None` connects unauthenticated.
    pub credentials: Option<(&'a str, &'a str)>,
}

impl Endpoint<'_> {
    /// `host:port` controller address.
    #[must_use]
    pub fn controller(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// ── Management Session Ports ──────────────────────────────────────────────────

/// One authenticated session against a server's management interface.
///
/// A server-side "failed" outcome is encoded in the returned [`CommandReply`],
/// never as an `Err`; `Err` from `execute` means the transport broke
/// (connection loss, malformed reply, timeout).
#[allow(async_fn_in_trait)]
pub trait ManagementSession {
    /// Issue one command and block until the server replies.
    ///
    /// # Errors
    ///
    /// Returns an error only for transport failures.
    async fn execute(&mut self, command: &str) -> Result<CommandReply>;

    /// Disconnect. Consumes the session so it cannot be closed twice;
    /// callers must invoke this exactly once per successful connect, on
    /// failure paths included.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying connection cannot be torn down
    /// cleanly. The session is unusable either way.
    async fn close(self) -> Result<()>
    where
        Self: Sized;
}

/// Opens management sessions. One connection attempt, no retry — the error
/// is surfaced to the orchestrator as-is.
#[allow(async_fn_in_trait)]
pub trait ManagementConnector {
    type Session: ManagementSession;

    /// Connect and authenticate against the endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be established.
    async fn connect(&self, endpoint: &Endpoint<'_>) -> Result<Self::Session>;
}

// ── Artifact Staging Port ─────────────────────────────────────────────────────

/// Resolves an artifact source to a path readable by the process that issues
/// management commands, staging a temporary copy when the source is remote.
#[allow(async_fn_in_trait)]
pub trait ArtifactStager {
    /// Resolve the source. Local sources are verified to exist and returned
    /// as-is; remote sources are copied into the staging area.
    ///
    /// # Errors
    ///
    /// Returns an error when the source file is missing or the copy fails.
    async fn stage(&self, source: &ArtifactSource) -> Result<StagedArtifact>;

    /// Delete a staged copy. Called once per run for staged artifacts,
    /// regardless of the run's outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the staged file cannot be removed.
    async fn cleanup(&self, staged: &Path) -> Result<()>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output using the instance's default
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or times out.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds
    /// `timeout`. On timeout, the child process must be killed (not left
    /// orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit log lines live without
/// depending on the presentation layer. Sync trait — no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}
