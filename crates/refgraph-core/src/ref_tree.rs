//! Nested presentation forests built from flat reference lists.
//!
//! `refs/heads/feature/login` becomes a `login` leaf under a synthesized
//! `feature` group under the `Branches` section. Remote branches keep
//! their remote name as an extra leading segment, so `origin` becomes a
//! group under `Remotes`.
//!
//! Construction is one pass over an arena of nodes plus an index from
//! parent id to child positions; the owned [`TreeNode`] tree is assembled
//! from the index at the end.

use std::collections::{HashMap, HashSet};

use refgraph_git::{RefKind, Reference};
use serde::Serialize;
use tracing::{debug, trace};

use crate::annotate::branch_label;

/// Which references a forest shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeRoot {
    /// Local branches.
    Local,
    /// Remote-tracking branches, grouped by remote.
    Remote,
    /// Tags.
    Tags,
}

impl TreeRoot {
    /// Whether references of `kind` belong under this root.
    #[must_use]
    pub const fn accepts(self, kind: &RefKind) -> bool {
        match kind {
            RefKind::LocalBranch => matches!(self, Self::Local),
            RefKind::RemoteBranch { .. } => matches!(self, Self::Remote),
            RefKind::Tag => matches!(self, Self::Tags),
            RefKind::Stash => false,
        }
    }
}

/// Display weight of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Bold,
    #[default]
    Regular,
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Synthetic section header ("Branches", "Remotes", ...).
    Section,
    /// Path prefix shared by several references, synthesized.
    Group,
    /// A real reference.
    Reference,
}

/// A node of a reference forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Path of the node below its section, e.g. `feature/login`.
    pub id: String,

    /// Text to display: last path segment plus tracking counts.
    pub label: String,

    /// Id of the parent node; the section label for top-level nodes.
    pub parent_id: String,

    /// Children, leaves before groups.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,

    /// The checked-out branch.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_head: bool,

    /// Display weight.
    pub emphasis: Emphasis,

    /// What the node stands for.
    pub kind: NodeKind,
}

impl TreeNode {
    fn collect<'a>(&'a self, out: &mut Vec<&'a TreeNode>) {
        out.push(self);
        for child in &self.children {
            child.collect(out);
        }
    }
}

/// A section header with its nested references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefForest {
    /// The section header node.
    pub root: TreeNode,
}

impl RefForest {
    /// All nodes below the section header, depth-first.
    #[must_use]
    pub fn nodes(&self) -> Vec<&TreeNode> {
        let mut out = Vec::new();
        for child in &self.root.children {
            child.collect(&mut out);
        }
        out
    }

    /// Find a node by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.nodes().into_iter().find(|n| n.id == id)
    }

    /// The node marked as head, if any.
    #[must_use]
    pub fn head(&self) -> Option<&TreeNode> {
        self.nodes().into_iter().find(|n| n.is_head)
    }

    /// Whether the section has no references.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}

/// Where an entry attaches. The section root is its own variant so a
/// reference whose path equals the section label cannot alias it.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParentKey {
    Root,
    Path(String),
}

impl ParentKey {
    /// Everything before the last separator, or the root.
    fn of(path: &str) -> Self {
        path.rsplit_once('/')
            .map_or(Self::Root, |(parent, _)| Self::Path(parent.to_string()))
    }
}

#[derive(Debug)]
struct Entry {
    id: String,
    label: String,
    parent: ParentKey,
    kind: NodeKind,
}

/// Build the forest for `root` out of `references`.
///
/// Input order decides sibling order among leaves and among groups;
/// leaves always come first. Duplicated paths keep the first occurrence.
#[must_use]
pub fn build_forest(references: &[Reference], root: TreeRoot, root_label: &str) -> RefForest {
    let mut arena: Vec<Entry> = Vec::new();
    let mut ids: HashSet<String> = HashSet::new();

    for reference in references.iter().filter(|r| root.accepts(&r.kind)) {
        let Some(path) = normalize(reference.display_name()) else {
            trace!(reference = %reference.canonical_path, "skipping reference with empty name");
            continue;
        };
        if !ids.insert(path.clone()) {
            trace!(reference = %reference.canonical_path, "skipping duplicate reference");
            continue;
        }

        arena.push(Entry {
            label: branch_label(last_segment(&path), reference.ahead, reference.behind),
            parent: ParentKey::of(&path),
            id: path,
            kind: NodeKind::Reference,
        });
    }

    // Synthesize missing parents; appended entries are visited in turn,
    // so grandparents get created too.
    let mut cursor = 0;
    while cursor < arena.len() {
        let missing = match &arena[cursor].parent {
            ParentKey::Path(parent) if !ids.contains(parent) => Some(parent.clone()),
            ParentKey::Path(_) | ParentKey::Root => None,
        };
        if let Some(parent) = missing {
            ids.insert(parent.clone());
            arena.push(Entry {
                label: last_segment(&parent).to_string(),
                parent: ParentKey::of(&parent),
                id: parent,
                kind: NodeKind::Group,
            });
        }
        cursor += 1;
    }

    // Every parent path now has an entry; link children by arena position.
    let position_of: HashMap<&str, usize> = arena
        .iter()
        .enumerate()
        .map(|(position, entry)| (entry.id.as_str(), position))
        .collect();
    let mut top_level: Vec<usize> = Vec::new();
    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); arena.len()];
    for (position, entry) in arena.iter().enumerate() {
        let parent = match &entry.parent {
            ParentKey::Path(parent) => position_of.get(parent.as_str()).copied(),
            ParentKey::Root => None,
        };
        match parent {
            Some(parent) => children_of[parent].push(position),
            None => top_level.push(position),
        }
    }

    debug!(
        ?root,
        nodes = arena.len(),
        groups = arena.iter().filter(|e| e.kind == NodeKind::Group).count(),
        "built reference forest"
    );

    let children = assemble(&arena, &children_of, &top_level, root_label);
    RefForest {
        root: TreeNode {
            id: root_label.to_string(),
            label: root_label.to_string(),
            parent_id: String::new(),
            children,
            is_head: false,
            emphasis: Emphasis::Bold,
            kind: NodeKind::Section,
        },
    }
}

fn assemble(
    arena: &[Entry],
    children_of: &[Vec<usize>],
    positions: &[usize],
    parent_id: &str,
) -> Vec<TreeNode> {
    let (groups, leaves): (Vec<usize>, Vec<usize>) = positions
        .iter()
        .copied()
        .partition(|&position| !children_of[position].is_empty());

    leaves
        .into_iter()
        .chain(groups)
        .map(|position| {
            let entry = &arena[position];
            TreeNode {
                id: entry.id.clone(),
                label: entry.label.clone(),
                parent_id: parent_id.to_string(),
                children: assemble(arena, children_of, &children_of[position], &entry.id),
                is_head: false,
                emphasis: Emphasis::Regular,
                kind: entry.kind,
            }
        })
        .collect()
}

/// Drop empty segments (`a//b`, trailing `/`); `None` if nothing is left.
fn normalize(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
