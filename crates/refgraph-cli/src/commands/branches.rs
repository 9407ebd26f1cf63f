//! `refgraph branches` command - Display references as trees.

use anyhow::{Context, Result};
use refgraph_core::{RefForest, RefreshService, TreeRoot};
use refgraph_git::HistoryFeed;

use super::utils::open_repo_and_config;
use crate::{output, render};

/// Run the branches command.
pub fn run(remotes: bool, tags: bool, json: bool) -> Result<()> {
    let (repo, config) = open_repo_and_config()?;

    let references = repo.list_references().context("Failed to list references")?;
    let head = repo.current_head_name()?;

    let mut roots = vec![TreeRoot::Local];
    if remotes {
        roots.push(TreeRoot::Remote);
    }
    if tags {
        roots.push(TreeRoot::Tags);
    }

    let service = RefreshService::new(&repo, &config);
    let forests: Vec<RefForest> = roots
        .into_iter()
        .map(|root| service.forest(&references, root, head.as_deref()))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&forests)?);
        return Ok(());
    }

    if head.is_none() {
        output::info("HEAD is detached; no branch is marked as current");
    }

    for (i, forest) in forests.iter().enumerate() {
        if i > 0 {
            output::essential("");
        }
        print_forest(forest);
    }

    Ok(())
}

fn print_forest(forest: &RefForest) {
    for line in render::tree_lines(forest) {
        output::essential(&line);
    }
    if forest.is_empty() {
        output::essential("  (none)");
    }
}
