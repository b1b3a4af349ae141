//! CLI for the collab-sweep tool.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use collab_sweep::config::API_URL_VAR;
use collab_sweep::prelude::*;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = "\
Usage Examples:

  List repositories where a user is a collaborator:
    collab-sweep <USERNAME>

  Remove a collaborator from all repos, confirming each one:
    collab-sweep <USERNAME> --delete

  Remove a collaborator from all repos without confirmation:
    collab-sweep <USERNAME> --delete-force

The token is read from GITHUB_TOKEN (a .env file in the current directory is honoured).";

#[derive(Parser)]
#[command(name = "collab-sweep")]
#[command(author, version, about = "Check or remove a GitHub collaborator across all organizations and repositories", long_about = None)]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// The GitHub username to check or remove
    username: String,

    /// Remove the collaborator, asking for confirmation on each repository
    #[arg(long)]
    delete: bool,

    /// Remove the collaborator from every repository without asking.
    /// WARNING: use with extreme caution
    #[arg(long, alias = "deleteforcefull")]
    delete_force: bool,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long, env = API_URL_VAR)]
    api_url: Option<String>,

    /// Back off once fewer than this many requests remain
    #[arg(long)]
    rate_limit_threshold: Option<u64>,

    /// Seconds to wait past the rate-limit reset time
    #[arg(long)]
    rate_limit_grace: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config = config.with_api_url(url);
    }
    if let Some(threshold) = cli.rate_limit_threshold {
        config = config.with_rate_limit_threshold(threshold);
    }
    if let Some(grace) = cli.rate_limit_grace {
        config = config.with_rate_limit_grace(Duration::from_secs(grace));
    }

    let client = GitHubClient::from_config(&config).context("Failed to create GitHub client")?;
    let mode = SweepMode::from_flags(cli.delete, cli.delete_force);
    tracing::debug!(?mode, api_url = %config.api_url, "starting sweep");

    let mut confirm = PromptConfirm::new(io::stdin().lock(), io::stdout());
    Sweep::new(&client, cli.username)
        .mode(mode)
        .run(&mut io::stdout(), &mut confirm)
        .context("Sweep aborted")?;

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
