//! Management session over a spawned management-CLI process.
//!
//! The production transport drives the server's CLI launcher
//! (`jboss-cli.sh` by default) with piped stdio: one child process, one
//! authenticated network connection, commands written line by line. Each
//! command is followed by an `echo <marker>` line so the response chunk can
//! be framed without relying on prompt detection.

use std::process::Stdio;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout};

use crate::application::ports::{Endpoint, ManagementConnector, ManagementSession};
use crate::domain::response::{self, CommandReply};

/// Default bound on one command round trip.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(60);

/// Bound on the quit/exit handshake when closing a session.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Marker echoed after every command to frame its response chunk.
const SYNC_MARKER: &str = "wfdeploy-sync-4f2a";

// ── Connector ─────────────────────────────────────────────────────────────────

/// Spawns one management-CLI child per [`connect`](ManagementConnector::connect).
pub struct CliSessionFactory {
    cli_command: String,
    reply_timeout: Duration,
}

impl CliSessionFactory {
    /// `cli_command` is the launcher binary, e.g. `jboss-cli.sh` or an
    /// absolute path to it.
    #[must_use]
    pub fn new(cli_command: impl Into<String>) -> Self {
        Self {
            cli_command: cli_command.into(),
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_reply_timeout(mut self, timeout: Duration) -> Self {
        self.reply_timeout = timeout;
        self
    }
}

impl ManagementConnector for CliSessionFactory {
    type Session = CliProcessSession;

    async fn connect(&self, endpoint: &Endpoint<'_>) -> Result<CliProcessSession> {
        let controller = endpoint.controller();
        let mut cmd = tokio::process::Command::new(&self.cli_command);
        cmd.args(launch_args(endpoint));
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn {}", self.cli_command))?;
        let stdin = child.stdin.take().context("child stdin unavailable")?;
        let stdout = BufReader::new(child.stdout.take().context("child stdout unavailable")?);

        let mut session = CliProcessSession {
            child,
            stdin,
            stdout,
            reply_timeout: self.reply_timeout,
        };

        // `--user` without `--password` makes the launcher prompt for the
        // secret; it is answered over the piped stdin so it never appears
        // on the argv, where any local user could read it from the process
        // table.
        if let Some((_, password)) = endpoint.credentials {
            if let Err(err) = session.send(password).await {
                let _ = session.child.kill().await;
                anyhow::bail!("connecting to {controller}: {err:#}");
            }
        }

        // A marker round trip proves the CLI reached the controller; the
        // launcher exits before replying when the connection is refused or
        // authentication fails.
        if let Err(err) = session.sync().await {
            let stderr = session.drain_stderr().await;
            let _ = session.child.kill().await;
            if stderr.is_empty() {
                anyhow::bail!("connecting to {controller}: {err:#}");
            }
            anyhow::bail!("connecting to {controller}: {err:#}: {}", stderr.trim());
        }

        Ok(session)
    }
}

/// Launcher argv for one connection attempt. The password is deliberately
/// absent: it goes over the child's stdin at the launcher's prompt.
fn launch_args(endpoint: &Endpoint<'_>) -> Vec<String> {
    let mut args = vec![
        "--connect".to_string(),
        format!("--controller={}", endpoint.controller()),
    ];
    if let Some((user, _)) = endpoint.credentials {
        args.push(format!("--user={user}"));
    }
    args
}

// ── Session ───────────────────────────────────────────────────────────────────

/// One live management session backed by a CLI child process.
pub struct CliProcessSession {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    reply_timeout: Duration,
}

impl CliProcessSession {
    async fn send(&mut self, line: &str) -> Result<()> {
        self.stdin.write_all(line.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;
        Ok(())
    }

    /// Echo the sync marker and read everything up to it.
    async fn sync(&mut self) -> Result<String> {
        self.send(&format!("echo {SYNC_MARKER}")).await?;
        self.read_until_marker().await
    }

    async fn read_until_marker(&mut self) -> Result<String> {
        let read = tokio::time::timeout(self.reply_timeout, read_chunk(&mut self.stdout)).await;
        match read {
            Ok(chunk) => chunk,
            Err(_elapsed) => {
                let _ = self.child.kill().await;
                anyhow::bail!(
                    "timed out after {}s waiting for the management CLI to reply",
                    self.reply_timeout.as_secs()
                )
            }
        }
    }

    /// Best-effort read of whatever the child wrote to stderr. The child is
    /// expected to have exited (or been killed) by the time this is called.
    async fn drain_stderr(&mut self) -> String {
        let Some(mut stderr) = self.child.stderr.take() else {
            return String::new();
        };
        let mut buf = String::new();
        let _ = tokio::time::timeout(Duration::from_secs(5), stderr.read_to_string(&mut buf)).await;
        buf
    }
}

impl ManagementSession for CliProcessSession {
    async fn execute(&mut self, command: &str) -> Result<CommandReply> {
        self.send(command)
            .await
            .context("writing command to the management CLI")?;
        let chunk = self.sync().await?;
        Ok(classify_reply(&chunk))
    }

    async fn close(mut self) -> Result<()> {
        // The stream may already be gone after a transport error.
        let _ = self.send("quit").await;
        match tokio::time::timeout(SHUTDOWN_TIMEOUT, self.child.wait()).await {
            Ok(status) => {
                status.context("waiting for the management CLI to exit")?;
                Ok(())
            }
            Err(_elapsed) => {
                let _ = self.child.kill().await;
                anyhow::bail!("management CLI did not exit after quit")
            }
        }
    }
}

/// Read lines until the sync marker. Free function so the borrow is limited
/// to the reader while the timeout wrapper still owns `self.child`.
async fn read_chunk(stdout: &mut BufReader<ChildStdout>) -> Result<String> {
    let mut chunk = String::new();
    loop {
        let mut line = String::new();
        let n = stdout
            .read_line(&mut line)
            .await
            .context("reading from the management CLI")?;
        if n == 0 {
            anyhow::bail!("management CLI closed the stream");
        }
        if line.trim_end() == SYNC_MARKER {
            return Ok(chunk);
        }
        chunk.push_str(&line);
    }
}

// ── Reply classification ──────────────────────────────────────────────────────

/// Map one framed response chunk onto the [`CommandReply`] contract.
///
/// - A DMR tree (`{"outcome" => ...}`) or a deployment listing table is a
///   structured reply.
/// - An empty chunk is a local-only accept: the CLI handled the command
///   without marshalling a server response.
/// - Remaining plain text is local-only; it counts as a rejection when it
///   reads like an error message.
///
/// Known edge: a structured server with zero deployments also prints
/// nothing for `deployment-info`, so its reply is indistinguishable from a
/// local-only accept and mode detection picks the local flow. The run
/// still converges there: the blind undeploy comes back as a benign
/// not-found and the deploy proceeds.
fn classify_reply(chunk: &str) -> CommandReply {
    let trimmed = chunk.trim();
    if trimmed.starts_with('{') && trimmed.contains("\"outcome\" =>") {
        return CommandReply::structured(trimmed);
    }
    if response::listed_deployments(trimmed).is_some() {
        return CommandReply::structured(trimmed);
    }
    if trimmed.is_empty() {
        return CommandReply::local_accept();
    }
    if looks_like_error(trimmed) {
        return CommandReply::local_reject(trimmed);
    }
    CommandReply {
        accepted: true,
        local_only: true,
        raw: trimmed.to_string(),
    }
}

/// Error-signature scan for replies with no structured payload. Documented
/// heuristic: the CLI prefixes errors with a WFLY* code or a known lead-in.
fn looks_like_error(text: &str) -> bool {
    let first = text.lines().next().unwrap_or_default();
    text.contains("WFLYCTL")
        || first.starts_with("Cannot ")
        || first.starts_with("Failed ")
        || first.starts_with("Unexpected ")
        || first.starts_with("Undeploy failed")
}
