//! Artifact staging over scp.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{ArtifactStager, CommandRunner};
use crate::domain::request::{ArtifactSource, StagedArtifact};

/// Stages archives from remote build agents with `scp`. The staging
/// directory is an explicit constructor argument; this type never consults
/// global state to find one.
pub struct ScpStager<R: CommandRunner> {
    runner: R,
    staging_dir: PathBuf,
}

impl<R: CommandRunner> ScpStager<R> {
    #[must_use]
    pub fn new(runner: R, staging_dir: PathBuf) -> Self {
        Self {
            runner,
            staging_dir,
        }
    }
}

impl<R: CommandRunner> ArtifactStager for ScpStager<R> {
    async fn stage(&self, source: &ArtifactSource) -> Result<StagedArtifact> {
        match source {
            ArtifactSource::Local(path) => {
                let meta = tokio::fs::metadata(path)
                    .await
                    .with_context(|| format!("archive '{}' does not exist", path.display()))?;
                anyhow::ensure!(
                    meta.is_file(),
                    "archive '{}' is not a regular file",
                    path.display()
                );
                Ok(StagedArtifact {
                    path: path.clone(),
                    staged: false,
                })
            }
            ArtifactSource::Remote { node, path } => {
                let file_name = source
                    .file_name()
                    .with_context(|| format!("remote path '{path}' has no filename component"))?;
                let dest = self.staging_dir.join(file_name);
                let dest_str = dest.to_string_lossy().to_string();
                let remote_spec = format!("{node}:{path}");
                let output = self
                    .runner
                    .run("scp", &["-q", &remote_spec, &dest_str])
                    .await
                    .context("running scp")?;
                anyhow::ensure!(
                    output.status.success(),
                    "scp of '{remote_spec}' failed: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                Ok(StagedArtifact {
                    path: dest,
                    staged: true,
                })
            }
        }
    }

    async fn cleanup(&self, staged: &Path) -> Result<()> {
        tokio::fs::remove_file(staged)
            .await
            .with_context(|| format!("removing staged copy '{}'", staged.display()))
    }
}
