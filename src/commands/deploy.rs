//! `wfdeploy deploy` — run one deployment reconciliation.

use anyhow::Result;
use clap::Args;

use crate::application::services::reconcile::reconcile;
use crate::domain::request::DeploymentRequest;
use crate::infra::cli_session::CliSessionFactory;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::stager::ScpStager;
use crate::output::reporter::TerminalReporter;
use crate::output::OutputContext;

/// Arguments for the deploy command.
#[derive(Args)]
pub struct DeployArgs {
    /// Path to the WAR/EAR archive; use node:path when it lives on a
    /// remote build agent
    #[arg(long)]
    pub archive: String,

    /// Management interface hostname
    #[arg(long)]
    pub host: String,

    /// Management interface port
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Management username (requires --password)
    #[arg(long)]
    pub username: Option<String>,

    /// Management password (requires --username)
    #[arg(long, env = "WFDEPLOY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Server group to scope commands to (managed domain)
    #[arg(long)]
    pub server_group: Option<String>,

    /// Management CLI launcher used to reach the server
    #[arg(long, env = "WFDEPLOY_CLI", default_value = "jboss-cli.sh")]
    pub cli_command: String,
}

/// Run `wfdeploy deploy`.
///
/// # Errors
///
/// Returns an error when the request is invalid or the run's outcome is a
/// failure; the outcome's error detail is the returned message.
pub async fn run(args: &DeployArgs, ctx: &OutputContext, json: bool) -> Result<()> {
    let request = DeploymentRequest::new(
        &args.archive,
        &args.host,
        args.port,
        args.username.as_deref(),
        args.password.as_deref(),
        args.server_group.as_deref(),
    )?;
    for advisory in request.advisories() {
        ctx.warn(&advisory);
    }

    let connector = CliSessionFactory::new(&args.cli_command);
    // The staging root is resolved here, at the composition edge, and
    // injected — the stager itself never consults the environment.
    let stager = ScpStager::new(TokioCommandRunner::default(), std::env::temp_dir());
    let reporter = TerminalReporter::new(ctx);

    let outcome = reconcile(&connector, &stager, &reporter, &request).await;

    if json {
        println!("{}", crate::output::json::render_outcome(&outcome)?);
    } else if outcome.succeeded {
        ctx.kv("Artifact", &request.artifact_name);
        ctx.kv("Server", &format!("{}:{}", request.host, request.port));
        if let Some(group) = &request.server_group {
            ctx.kv("Server group", group);
        }
    }

    if outcome.succeeded {
        Ok(())
    } else {
        let detail = outcome
            .error_detail
            .unwrap_or_else(|| "deployment failed".to_string());
        anyhow::bail!(detail)
    }
}
