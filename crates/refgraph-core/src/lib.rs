//! # refgraph-core
//!
//! Core library for refgraph, a viewer for a repository's references and
//! history.
//!
//! This crate provides:
//! - Reference trees: branches, remotes and tags grouped by path segment
//! - Head marking and ahead/behind labels
//! - Lane allocation for drawing history as colored parallel tracks
//! - Configuration and a refresh service tying it all to a feed

pub mod annotate;
pub mod config;
pub mod error;
pub mod lanes;
pub mod palette;
pub mod ref_tree;
pub mod refresh;

#[cfg(test)]
mod test_mocks;

pub use annotate::{branch_label, mark_head};
pub use config::Config;
pub use error::{Error, Result};
pub use lanes::{CommitGraph, CommitGraphNode, Lane, LaneAllocator, LaneTag, LaneWalk};
pub use palette::{Color, ColorPalette};
pub use ref_tree::{Emphasis, NodeKind, RefForest, TreeNode, TreeRoot, build_forest};
pub use refresh::{RefreshService, RepoView};
