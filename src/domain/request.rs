//! Deployment request construction and validation.

use std::path::{Path, PathBuf};

use crate::domain::error::RequestError;

// ── Artifact source ───────────────────────────────────────────────────────────

/// Where the archive lives before the run starts.
///
/// Callers depend only on the `ArtifactStager` capability to turn either
/// variant into a path the management session's host process can read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactSource {
    /// The archive is already reachable from this process.
    Local(PathBuf),
    /// The archive sits on a remote build agent and must be staged first.
    Remote { node: String, path: String },
}

impl ArtifactSource {
    /// Parse `node:path` scp-style syntax into a remote source; anything
    /// else is a local path. Single-character prefixes stay local so
    /// Windows drive letters are not mistaken for host names.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if let Some((node, path)) = raw.split_once(':') {
            if node.len() > 1 && !node.contains('/') && !node.contains('\\') && !path.is_empty() {
                return Self::Remote {
                    node: node.to_string(),
                    path: path.to_string(),
                };
            }
        }
        Self::Local(PathBuf::from(raw))
    }

    /// Final path segment of the archive, i.e. the deployment name.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        let raw = match self {
            Self::Local(path) => path.to_str()?,
            Self::Remote { path, .. } => path.as_str(),
        };
        let name = raw.rsplit(['/', '\\']).next()?;
        if name.is_empty() { None } else { Some(name) }
    }

    /// Human-readable description for log lines.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Local(path) => path.display().to_string(),
            Self::Remote { node, path } => format!("{node}:{path}"),
        }
    }
}

/// Result of resolving an [`ArtifactSource`] to a readable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedArtifact {
    /// Path the management session's host process can read.
    pub path: PathBuf,
    /// Whether a temporary copy was created that must be cleaned up.
    pub staged: bool,
}

// ── Credentials ───────────────────────────────────────────────────────────────

/// Paired management credentials. Both fields are non-empty by construction.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Pair up optional username/password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::UnpairedCredentials`] when exactly one of the
    /// two is non-empty.
    pub fn pair(
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Option<Self>, RequestError> {
        let username = username.map(str::trim).filter(|s| !s.is_empty());
        let password = password.map(str::trim).filter(|s| !s.is_empty());
        match (username, password) {
            (Some(u), Some(p)) => Ok(Some(Self {
                username: u.to_string(),
                password: p.to_string(),
            })),
            (None, None) => Ok(None),
            _ => Err(RequestError::UnpairedCredentials),
        }
    }
}

// ── Deployment request ────────────────────────────────────────────────────────

/// Validated coordinates for one deployment run. Constructed once from the
/// pipeline configuration and read-only thereafter.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub archive: ArtifactSource,
    /// Deployment name: the final path segment of the archive.
    pub artifact_name: String,
    pub host: String,
    pub port: u16,
    pub credentials: Option<Credentials>,
    pub server_group: Option<String>,
}

impl DeploymentRequest {
    /// Build a request from raw pipeline inputs, trimming every field.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] when the archive path or host is empty,
    /// the port is zero, the archive path has no filename component, or
    /// only one of username/password is given.
    pub fn new(
        archive: &str,
        host: &str,
        port: u16,
        username: Option<&str>,
        password: Option<&str>,
        server_group: Option<&str>,
    ) -> Result<Self, RequestError> {
        let archive_raw = archive.trim();
        if archive_raw.is_empty() {
            return Err(RequestError::EmptyArchive);
        }
        let host = host.trim();
        if host.is_empty() {
            return Err(RequestError::EmptyHost);
        }
        if port == 0 {
            return Err(RequestError::PortOutOfRange);
        }

        let archive = ArtifactSource::parse(archive_raw);
        let artifact_name = archive
            .file_name()
            .ok_or_else(|| RequestError::NoArtifactName(archive_raw.to_string()))?
            .to_string();
        let credentials = Credentials::pair(username, password)?;
        let server_group = server_group
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            archive,
            artifact_name,
            host: host.to_string(),
            port,
            credentials,
            server_group,
        })
    }

    /// Advisory warnings for inputs that are legal but suspicious. These are
    /// input hygiene only and never block the run.
    #[must_use]
    pub fn advisories(&self) -> Vec<String> {
        let mut notes = Vec::new();
        let lower = self.artifact_name.to_lowercase();
        if !lower.ends_with(".war") && !lower.ends_with(".ear") {
            notes.push(format!(
                "'{}' does not look like a WAR or EAR filename",
                self.artifact_name
            ));
        } else if self.artifact_name.len() < 7 {
            notes.push(format!(
                "is '{}' a valid WAR or EAR filename?",
                self.artifact_name
            ));
        }
        if self.host.len() < 4 {
            notes.push(format!("is '{}' a valid hostname?", self.host));
        }
        if let Some(group) = &self.server_group {
            if group.len() < 5 {
                notes.push(format!("is '{group}' a valid server group name?"));
            }
        }
        notes
    }

    /// Local path of the archive when no staging is involved.
    #[must_use]
    pub fn local_path(&self) -> Option<&Path> {
        match &self.archive {
            ArtifactSource::Local(path) => Some(path),
            ArtifactSource::Remote { .. } => None,
        }
    }
}
