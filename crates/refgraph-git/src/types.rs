//! Plain data handed from the repository feed to the engine.

use std::borrow::Borrow;
use std::fmt;

use git2::Oid;
use serde::Serialize;

/// Classification of a reference by its namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefKind {
    /// `refs/heads/<name>`
    LocalBranch,
    /// `refs/remotes/<remote>/<name>`
    RemoteBranch {
        /// Remote name, e.g. `origin`.
        remote: String,
    },
    /// `refs/tags/<name>`
    Tag,
    /// `refs/stash`
    Stash,
}

impl RefKind {
    /// Classify a canonical reference path.
    ///
    /// Returns `None` for paths outside the namespaces refgraph displays
    /// (e.g. `HEAD`, `refs/notes/commits`, `refs/pull/1/head`).
    #[must_use]
    pub fn classify(canonical_path: &str) -> Option<Self> {
        let mut segments = canonical_path.split('/');
        if segments.next() != Some("refs") {
            return None;
        }

        match segments.next()? {
            "heads" => Some(Self::LocalBranch),
            "remotes" => segments
                .next()
                .filter(|remote| !remote.is_empty())
                .map(|remote| Self::RemoteBranch {
                    remote: remote.to_string(),
                }),
            "tags" => Some(Self::Tag),
            "stash" if segments.next().is_none() => Some(Self::Stash),
            _ => None,
        }
    }
}

/// A named reference as read from the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Fully namespaced path, e.g. `refs/heads/feature/login`.
    pub canonical_path: String,

    /// Namespace classification.
    #[serde(flatten)]
    pub kind: RefKind,

    /// Commits the branch has that its upstream lacks.
    pub ahead: usize,

    /// Commits the upstream has that the branch lacks.
    pub behind: usize,

    /// Commit the reference resolves to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<CommitId>,
}

impl Reference {
    /// Create a reference from its canonical path.
    ///
    /// Returns `None` if the path is not in a displayable namespace.
    #[must_use]
    pub fn new(canonical_path: impl Into<String>) -> Option<Self> {
        let canonical_path = canonical_path.into();
        let kind = RefKind::classify(&canonical_path)?;
        Some(Self {
            canonical_path,
            kind,
            ahead: 0,
            behind: 0,
            target: None,
        })
    }

    /// Local branch `refs/heads/<name>`.
    #[must_use]
    pub fn local(name: &str) -> Self {
        Self {
            canonical_path: format!("refs/heads/{name}"),
            kind: RefKind::LocalBranch,
            ahead: 0,
            behind: 0,
            target: None,
        }
    }

    /// Remote-tracking branch `refs/remotes/<remote>/<name>`.
    #[must_use]
    pub fn remote(remote: &str, name: &str) -> Self {
        Self {
            canonical_path: format!("refs/remotes/{remote}/{name}"),
            kind: RefKind::RemoteBranch {
                remote: remote.to_string(),
            },
            ahead: 0,
            behind: 0,
            target: None,
        }
    }

    /// Tag `refs/tags/<name>`.
    #[must_use]
    pub fn tag(name: &str) -> Self {
        Self {
            canonical_path: format!("refs/tags/{name}"),
            kind: RefKind::Tag,
            ahead: 0,
            behind: 0,
            target: None,
        }
    }

    /// Set the tracking counts.
    #[must_use]
    pub const fn with_tracking(mut self, ahead: usize, behind: usize) -> Self {
        self.ahead = ahead;
        self.behind = behind;
        self
    }

    /// Set the commit the reference points at.
    #[must_use]
    pub fn with_target(mut self, target: impl Into<CommitId>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Whether this is a remote-tracking branch.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        matches!(self.kind, RefKind::RemoteBranch { .. })
    }

    /// The path with its two namespace segments removed.
    ///
    /// `refs/heads/feature/login` gives `feature/login`;
    /// `refs/remotes/origin/main` gives `origin/main`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.canonical_path.splitn(3, '/').nth(2).unwrap_or("")
    }

    /// The name git would use as a shorthand for checkout.
    ///
    /// Same as [`display_name`](Self::display_name) except for remote
    /// branches, where the remote segment is dropped as well.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        let display = self.display_name();
        match &self.kind {
            RefKind::RemoteBranch { remote } => display
                .strip_prefix(remote.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or(display),
            RefKind::LocalBranch | RefKind::Tag | RefKind::Stash => display,
        }
    }
}

/// Identifier of a row in the history feed.
///
/// Real commits carry their full hex id; pseudo rows for uncommitted
/// changes carry a reserved id that can never collide with a hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    /// Create a commit id from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Reserved id of the staged-changes pseudo row.
    #[must_use]
    pub fn staged() -> Self {
        Self("::staged".to_string())
    }

    /// Reserved id of the unstaged-changes pseudo row.
    #[must_use]
    pub fn unstaged() -> Self {
        Self("::unstaged".to_string())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` characters of the id.
    #[must_use]
    pub fn short(&self, len: usize) -> &str {
        self.0.get(..len).unwrap_or(&self.0)
    }
}

impl From<Oid> for CommitId {
    fn from(oid: Oid) -> Self {
        Self(oid.to_string())
    }
}

impl From<&str> for CommitId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CommitId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for CommitId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a history row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitKind {
    /// A regular commit.
    #[default]
    Commit,
    /// A stash entry.
    Stash,
    /// Changes staged in the index.
    Staged,
    /// Changes in the working tree not yet staged.
    Unstaged,
}

/// One row of history, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitEntry {
    /// Row id.
    pub id: CommitId,

    /// Parent ids in commit order (first parent first).
    pub parent_ids: Vec<CommitId>,

    /// What this row represents.
    pub kind: CommitKind,

    /// The commit sits on a shallow-clone boundary: its parents exist
    /// upstream but were never fetched.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub shallow: bool,

    /// First line of the message.
    pub summary: String,

    /// Author name.
    pub author: String,
}

impl CommitEntry {
    /// Create a regular commit row.
    #[must_use]
    pub fn new(id: impl Into<CommitId>, parent_ids: impl IntoIterator<Item = CommitId>) -> Self {
        Self {
            id: id.into(),
            parent_ids: parent_ids.into_iter().collect(),
            kind: CommitKind::Commit,
            shallow: false,
            summary: String::new(),
            author: String::new(),
        }
    }

    /// Set the row kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: CommitKind) -> Self {
        self.kind = kind;
        self
    }

    /// Mark the row as a shallow boundary.
    #[must_use]
    pub const fn with_shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    /// Set the summary line.
    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Set the author name.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }
}
