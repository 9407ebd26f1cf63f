use anyhow::{Context, Result};
use refgraph_core::Config;
use refgraph_git::Repository;
use tracing::debug;

/// Helper to open the repository and its refgraph config.
pub fn open_repo_and_config() -> Result<(Repository, Config)> {
    let repo = Repository::open_current().context("Not inside a git repository")?;
    let path = Config::path_for(repo.git_dir());
    let config = Config::load(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    debug!(git_dir = %repo.git_dir().display(), "opened repository");
    Ok((repo, config))
}
