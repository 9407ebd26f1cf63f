//! Trait abstraction for the read-only repository feed.
//!
//! This module defines the `HistoryFeed` trait which abstracts the three
//! reads the engine needs, enabling dependency injection and testability.

use crate::{CommitEntry, Reference, Result};

/// Options for a history walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitQuery {
    /// Maximum number of real commits to return.
    pub max_commits: usize,

    /// Start from every branch and tag instead of HEAD only.
    pub all_refs: bool,

    /// Prepend staged/unstaged pseudo rows when the working tree is dirty.
    pub include_uncommitted: bool,

    /// Prepend one row per stash entry.
    pub include_stashes: bool,
}

impl Default for CommitQuery {
    fn default() -> Self {
        Self {
            max_commits: 500,
            all_refs: true,
            include_uncommitted: true,
            include_stashes: true,
        }
    }
}

/// Trait for the repository reads the engine consumes.
///
/// This trait abstracts the repository, allowing for:
/// - Mock implementations for testing the engine without a repository
/// - Alternative backends (e.g. a recorded snapshot)
///
/// Implementations are read-only; a full refresh calls each method once.
#[allow(clippy::missing_errors_doc)]
pub trait HistoryFeed {
    /// List every displayable reference.
    ///
    /// Local branches carry ahead/behind counts against their upstream.
    fn list_references(&self) -> Result<Vec<Reference>>;

    /// List history rows, children before parents, newest first.
    fn list_commits(&self, query: &CommitQuery) -> Result<Vec<CommitEntry>>;

    /// Short name of the checked-out branch.
    ///
    /// Returns `None` when HEAD is detached or unborn.
    fn current_head_name(&self) -> Result<Option<String>>;
}
