//! Refresh service: one full rebuild of everything the views display.
//!
//! Reads the feed once per call and rebuilds the three reference trees and
//! the commit graph from scratch, so identical feed output always yields an
//! identical [`RepoView`].

use std::collections::BTreeMap;

use refgraph_git::{CommitEntry, CommitId, HistoryFeed, Reference};
use serde::Serialize;
use tracing::debug;

use crate::annotate::mark_head;
use crate::config::Config;
use crate::error::Result;
use crate::lanes::{CommitGraph, LaneAllocator};
use crate::ref_tree::{RefForest, TreeRoot, build_forest};

/// Snapshot of the repository as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoView {
    /// Local branches.
    pub local: RefForest,

    /// Remote-tracking branches grouped by remote.
    pub remote: RefForest,

    /// Tags.
    pub tags: RefForest,

    /// Lane layout of the walked history.
    pub graph: CommitGraph,

    /// Checked-out branch, `None` when detached.
    pub head: Option<String>,

    /// Reference names pointing at each commit.
    pub decorations: BTreeMap<CommitId, Vec<String>>,

    #[serde(skip)]
    commits: Vec<CommitEntry>,
}

impl RepoView {
    /// Reference names pointing at `commit_id`, in path order.
    #[must_use]
    pub fn decorations_for(&self, commit_id: &str) -> &[String] {
        self.decorations
            .get(commit_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Feed rows the graph was built from, in graph order.
    #[must_use]
    pub fn commits(&self) -> &[CommitEntry] {
        &self.commits
    }

    /// Forest for one tree root.
    #[must_use]
    pub const fn forest(&self, root: TreeRoot) -> &RefForest {
        match root {
            TreeRoot::Local => &self.local,
            TreeRoot::Remote => &self.remote,
            TreeRoot::Tags => &self.tags,
        }
    }
}

/// Service rebuilding a [`RepoView`] from a feed.
pub struct RefreshService<'a, F: HistoryFeed> {
    feed: &'a F,
    config: &'a Config,
}

impl<'a, F: HistoryFeed> RefreshService<'a, F> {
    /// Create a new refresh service.
    #[must_use]
    pub const fn new(feed: &'a F, config: &'a Config) -> Self {
        Self { feed, config }
    }

    /// Build one reference tree, marking `head` in the local tree.
    #[must_use]
    pub fn forest(&self, references: &[Reference], root: TreeRoot, head: Option<&str>) -> RefForest {
        let labels = &self.config.labels;
        let label = match root {
            TreeRoot::Local => &labels.local,
            TreeRoot::Remote => &labels.remote,
            TreeRoot::Tags => &labels.tags,
        };

        let mut forest = build_forest(references, root, label);
        let head = if root == TreeRoot::Local { head } else { None };
        mark_head(&mut forest, head);
        forest
    }

    /// Walk history and lay out its lanes.
    ///
    /// # Errors
    /// Returns error if the feed fails, the palette is malformed or the
    /// feed's commit order is not children-before-parents.
    pub fn graph(&self) -> Result<(Vec<CommitEntry>, CommitGraph)> {
        let commits = self.feed.list_commits(&self.config.graph.query())?;
        let mut allocator = LaneAllocator::new(self.config.graph.palette()?);
        let graph = allocator.build(&commits)?;
        Ok((commits, graph))
    }

    /// Rebuild everything.
    ///
    /// # Errors
    /// Returns error if any feed read fails or the graph can't be built.
    pub fn refresh(&self) -> Result<RepoView> {
        let references = self.feed.list_references()?;
        let head = self.feed.current_head_name()?;
        let (commits, graph) = self.graph()?;

        let mut decorations: BTreeMap<CommitId, Vec<String>> = BTreeMap::new();
        for reference in &references {
            if let Some(target) = &reference.target {
                decorations
                    .entry(target.clone())
                    .or_default()
                    .push(reference.display_name().to_string());
            }
        }

        let view = RepoView {
            local: self.forest(&references, TreeRoot::Local, head.as_deref()),
            remote: self.forest(&references, TreeRoot::Remote, head.as_deref()),
            tags: self.forest(&references, TreeRoot::Tags, head.as_deref()),
            graph,
            head,
            decorations,
            commits,
        };

        debug!(
            references = references.len(),
            rows = view.graph.len(),
            head = ?view.head,
            "refreshed repository view"
        );
        Ok(view)
    }
}
