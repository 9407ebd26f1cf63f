//! `refgraph graph` command - Display history as colored lanes.

use anyhow::{Context, Result};
use colored::Colorize;
use refgraph_core::{CommitGraphNode, RefreshService, RepoView};
use refgraph_git::{CommitEntry, CommitKind};
use serde::Serialize;

use super::utils::open_repo_and_config;
use crate::{output, render};

/// Length of abbreviated commit ids.
const SHORT_ID: usize = 7;

/// One row of JSON output: the lane layout plus what the row shows.
#[derive(Debug, Serialize)]
struct GraphRow<'a> {
    #[serde(flatten)]
    node: &'a CommitGraphNode,
    summary: &'a str,
    author: &'a str,
    refs: &'a [String],
}

/// JSON output for the graph command.
#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    head: Option<&'a str>,
    width: usize,
    rows: Vec<GraphRow<'a>>,
}

/// Run the graph command.
pub fn run(max_count: Option<usize>, json: bool) -> Result<()> {
    let (repo, mut config) = open_repo_and_config()?;
    if let Some(max_count) = max_count {
        config.graph.max_commits = max_count;
    }

    let view = RefreshService::new(&repo, &config)
        .refresh()
        .context("Failed to build commit graph")?;

    if json {
        print_json(&view)?;
        return Ok(());
    }

    if view.graph.is_empty() {
        output::info("No commits yet");
        return Ok(());
    }
    if repo.is_shallow() {
        output::warn("Shallow clone: history stops at the fetched depth (◌)");
    }

    print_rows(&view);
    Ok(())
}

fn print_rows(view: &RepoView) {
    let width = view.graph.width();
    let mut prev: Option<&CommitGraphNode> = None;

    for (node, commit) in view.graph.nodes().iter().zip(view.commits()) {
        if let Some(cells) = prev.and_then(|p| render::connector_cells(p, node, width)) {
            output::essential(&render::paint(&cells));
        }

        let cells = render::commit_cells(node, width);
        output::essential(&format!(
            "{} {}",
            render::paint(&cells),
            describe(view, commit)
        ));
        prev = Some(node);
    }
}

/// Text after the lanes: id, decorations and summary.
fn describe(view: &RepoView, commit: &CommitEntry) -> String {
    match commit.kind {
        CommitKind::Staged | CommitKind::Unstaged => commit.summary.italic().to_string(),
        CommitKind::Stash => format!(
            "{} {}",
            commit.id.short(SHORT_ID).yellow(),
            commit.summary.dimmed()
        ),
        CommitKind::Commit => format!(
            "{} {}{} {}",
            commit.id.short(SHORT_ID).yellow(),
            output::decorations(view.decorations_for(commit.id.as_str()), view.head.as_deref()),
            commit.summary,
            commit.author.dimmed()
        ),
    }
}

/// Print the graph as JSON.
fn print_json(view: &RepoView) -> Result<()> {
    let rows = view
        .graph
        .nodes()
        .iter()
        .zip(view.commits())
        .map(|(node, commit)| GraphRow {
            node,
            summary: &commit.summary,
            author: &commit.author,
            refs: view.decorations_for(commit.id.as_str()),
        })
        .collect();

    let output = JsonOutput {
        head: view.head.as_deref(),
        width: view.graph.width(),
        rows,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
