//! Repository wrapper providing the read-only history feed.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use git2::{BranchType, ErrorCode, Oid, ReferenceType, Sort, Status, StatusOptions};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::traits::{CommitQuery, HistoryFeed};
use crate::types::{CommitEntry, CommitId, CommitKind, RefKind, Reference};

const STASH_REF: &str = "refs/stash";

/// High-level wrapper around a git repository.
pub struct Repository {
    inner: git2::Repository,
}

impl Repository {
    /// Open a repository at the given path.
    ///
    /// # Errors
    /// Returns error if no repository found at path or any parent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                Error::NotARepository
            } else {
                Error::Git2(e)
            }
        })?;
        Ok(Self { inner })
    }

    /// Open the repository containing the current directory.
    ///
    /// # Errors
    /// Returns error if not inside a git repository.
    pub fn open_current() -> Result<Self> {
        Self::open(".")
    }

    /// Get the path to the repository root (workdir).
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.inner.workdir()
    }

    /// Get the path to the .git directory.
    #[must_use]
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Whether the repository is a shallow clone.
    #[must_use]
    pub fn is_shallow(&self) -> bool {
        self.inner.is_shallow()
    }

    /// Resolve HEAD to a commit id.
    ///
    /// Returns `None` for an unborn branch.
    ///
    /// # Errors
    /// Returns error if HEAD cannot be read.
    pub fn head_commit(&self) -> Result<Option<Oid>> {
        match self.inner.head() {
            Ok(head) => Ok(head.target()),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Commits recorded in `.git/shallow`: their parents were never fetched.
    fn shallow_boundaries(&self) -> Result<HashSet<Oid>> {
        let content = match fs::read_to_string(self.git_dir().join("shallow")) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashSet::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(content
            .lines()
            .filter_map(|line| Oid::from_str(line.trim()).ok())
            .collect())
    }

    /// Ahead/behind counts of a local branch against its upstream.
    ///
    /// Branches without an upstream report `(0, 0)`.
    fn tracking_counts(&self, branch_name: &str) -> Result<(usize, usize)> {
        let Ok(branch) = self.inner.find_branch(branch_name, BranchType::Local) else {
            return Ok((0, 0));
        };
        let Ok(upstream) = branch.upstream() else {
            return Ok((0, 0));
        };

        match (branch.get().target(), upstream.get().target()) {
            (Some(local), Some(remote)) => Ok(self.inner.graph_ahead_behind(local, remote)?),
            _ => Ok((0, 0)),
        }
    }

    /// Pseudo rows for uncommitted work, children of HEAD.
    fn uncommitted_rows(&self, head: Oid) -> Result<Vec<CommitEntry>> {
        if self.workdir().is_none() {
            return Ok(Vec::new());
        }

        let mut opts = StatusOptions::new();
        opts.include_untracked(true).exclude_submodules(true);
        let statuses = self.inner.statuses(Some(&mut opts))?;

        let staged_mask = Status::INDEX_NEW
            | Status::INDEX_MODIFIED
            | Status::INDEX_DELETED
            | Status::INDEX_RENAMED
            | Status::INDEX_TYPECHANGE;
        let unstaged_mask = Status::WT_NEW
            | Status::WT_MODIFIED
            | Status::WT_DELETED
            | Status::WT_RENAMED
            | Status::WT_TYPECHANGE;

        let staged = statuses
            .iter()
            .filter(|s| s.status().intersects(staged_mask))
            .count();
        let unstaged = statuses
            .iter()
            .filter(|s| s.status().intersects(unstaged_mask))
            .count();

        let mut rows = Vec::new();
        if unstaged > 0 {
            rows.push(
                CommitEntry::new(CommitId::unstaged(), [CommitId::from(head)])
                    .with_kind(CommitKind::Unstaged)
                    .with_summary(format!("Unstaged changes ({unstaged} files)")),
            );
        }
        if staged > 0 {
            rows.push(
                CommitEntry::new(CommitId::staged(), [CommitId::from(head)])
                    .with_kind(CommitKind::Staged)
                    .with_summary(format!("Staged changes ({staged} files)")),
            );
        }
        Ok(rows)
    }

    /// One row per stash entry, child of the commit the stash was taken on.
    fn stash_rows(&self) -> Result<Vec<CommitEntry>> {
        if self.inner.find_reference(STASH_REF).is_err() {
            return Ok(Vec::new());
        }

        let reflog = self.inner.reflog(STASH_REF)?;
        let mut rows = Vec::with_capacity(reflog.len());
        for entry in reflog.iter() {
            let stash = self.inner.find_commit(entry.id_new())?;
            // Later parents are the index/untracked snapshots, not history.
            let base = stash.parent_id(0)?;
            rows.push(
                CommitEntry::new(stash.id(), [CommitId::from(base)])
                    .with_kind(CommitKind::Stash)
                    .with_summary(entry.message().unwrap_or("stash"))
                    .with_author(stash.author().name().unwrap_or("unknown")),
            );
        }
        Ok(rows)
    }

    /// Get a reference to the underlying git2 repository.
    ///
    /// Use sparingly - prefer high-level methods.
    #[must_use]
    pub fn inner(&self) -> &git2::Repository {
        &self.inner
    }
}

impl HistoryFeed for Repository {
    fn list_references(&self) -> Result<Vec<Reference>> {
        let mut references = Vec::new();

        for reference in self.inner.references()? {
            let reference = reference?;
            // Symbolic refs such as refs/remotes/origin/HEAD are aliases.
            if reference.kind() != Some(ReferenceType::Direct) {
                continue;
            }
            let Some(name) = reference.name() else {
                continue;
            };
            let Some(mut parsed) = Reference::new(name) else {
                trace!(reference = name, "skipping reference outside known namespaces");
                continue;
            };

            if let Ok(commit) = reference.peel_to_commit() {
                parsed = parsed.with_target(commit.id());
            }
            if parsed.kind == RefKind::LocalBranch {
                let (ahead, behind) = self.tracking_counts(parsed.display_name())?;
                parsed = parsed.with_tracking(ahead, behind);
            }
            references.push(parsed);
        }

        references.sort_by(|a, b| a.canonical_path.cmp(&b.canonical_path));
        debug!(count = references.len(), "listed references");
        Ok(references)
    }

    fn list_commits(&self, query: &CommitQuery) -> Result<Vec<CommitEntry>> {
        let head = self.head_commit()?;

        let mut revwalk = self.inner.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        if let Some(oid) = head {
            revwalk.push(oid)?;
        }
        if query.all_refs {
            revwalk.push_glob("refs/heads")?;
            revwalk.push_glob("refs/remotes")?;
            revwalk.push_glob("refs/tags")?;
        }

        let shallow = self.shallow_boundaries()?;
        let mut rows = Vec::new();

        if let Some(head) = head {
            if query.include_uncommitted {
                rows.extend(self.uncommitted_rows(head)?);
            }
        }
        if query.include_stashes {
            rows.extend(self.stash_rows()?);
        }

        for oid in revwalk.take(query.max_commits) {
            let oid = oid?;
            let commit = self.inner.find_commit(oid)?;
            rows.push(
                CommitEntry::new(oid, commit.parent_ids().map(CommitId::from))
                    .with_shallow(shallow.contains(&oid))
                    .with_summary(commit.summary().unwrap_or(""))
                    .with_author(commit.author().name().unwrap_or("unknown")),
            );
        }

        debug!(
            rows = rows.len(),
            max_commits = query.max_commits,
            shallow = !shallow.is_empty(),
            "walked history"
        );
        Ok(rows)
    }

    fn current_head_name(&self) -> Result<Option<String>> {
        match self.inner.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(String::from)),
            Ok(_) => Ok(None),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_unborn(error: &git2::Error) -> bool {
    matches!(error.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.git_dir())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{RepositoryInitOptions, Signature};
    use tempfile::TempDir;

    fn init_test_repo() -> (TempDir, Repository) {
        let temp = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = git2::Repository::init_opts(temp.path(), &opts).unwrap();
        let wrapped = Repository { inner: repo };
        commit_on(&wrapped, "HEAD", "Initial commit", &[]);
        (temp, wrapped)
    }

    fn commit_on(repo: &Repository, update_ref: &str, message: &str, parents: &[Oid]) -> Oid {
        let inner = repo.inner();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = inner.index().unwrap().write_tree().unwrap();
        let tree = inner.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit<'_>> = parents
            .iter()
            .map(|oid| inner.find_commit(*oid).unwrap())
            .collect();
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();
        inner
            .commit(Some(update_ref), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn head(repo: &Repository) -> Oid {
        repo.head_commit().unwrap().unwrap()
    }

    #[test]
    fn test_current_head_name() {
        let (_temp, repo) = init_test_repo();
        assert_eq!(repo.current_head_name().unwrap().as_deref(), Some("main"));

        repo.inner().set_head_detached(head(&repo)).unwrap();
        assert_eq!(repo.current_head_name().unwrap(), None);
    }

    #[test]
    fn test_list_references_classifies_namespaces() {
        let (_temp, repo) = init_test_repo();
        let tip = head(&repo);
        let inner = repo.inner();
        let commit = inner.find_commit(tip).unwrap();
        inner.branch("feature/a", &commit, false).unwrap();
        inner
            .reference("refs/remotes/origin/main", tip, true, "test")
            .unwrap();
        inner
            .reference_symbolic(
                "refs/remotes/origin/HEAD",
                "refs/remotes/origin/main",
                true,
                "test",
            )
            .unwrap();
        inner.tag_lightweight("v1.0", commit.as_object(), false).unwrap();

        let refs = repo.list_references().unwrap();
        let paths: Vec<&str> = refs.iter().map(|r| r.canonical_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "refs/heads/feature/a",
                "refs/heads/main",
                "refs/remotes/origin/main",
                "refs/tags/v1.0",
            ]
        );
        assert!(refs[2].is_remote());
        assert_eq!(refs[3].kind, RefKind::Tag);
    }

    #[test]
    fn test_list_references_tracking_counts() {
        let (_temp, repo) = init_test_repo();
        let base = head(&repo);
        let inner = repo.inner();
        inner.remote("origin", "https://example.com/repo.git").unwrap();
        inner
            .reference("refs/remotes/origin/main", base, true, "test")
            .unwrap();
        inner
            .find_branch("main", BranchType::Local)
            .unwrap()
            .set_upstream(Some("origin/main"))
            .unwrap();

        let second = commit_on(&repo, "HEAD", "Second", &[base]);
        commit_on(&repo, "HEAD", "Third", &[second]);

        let refs = repo.list_references().unwrap();
        let main = refs
            .iter()
            .find(|r| r.canonical_path == "refs/heads/main")
            .unwrap();
        assert_eq!((main.ahead, main.behind), (2, 0));

        let remote = refs
            .iter()
            .find(|r| r.canonical_path == "refs/remotes/origin/main")
            .unwrap();
        assert_eq!((remote.ahead, remote.behind), (0, 0));
    }

    #[test]
    fn test_list_commits_topological_order() {
        let (_temp, repo) = init_test_repo();
        let base = head(&repo);
        let inner = repo.inner();
        inner
            .branch("side", &inner.find_commit(base).unwrap(), false)
            .unwrap();
        let side = commit_on(&repo, "refs/heads/side", "Side work", &[base]);
        let main = commit_on(&repo, "HEAD", "Main work", &[base]);
        let merge = commit_on(&repo, "HEAD", "Merge side", &[main, side]);

        let rows = repo.list_commits(&CommitQuery::default()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].id, CommitId::from(merge));
        assert_eq!(
            rows[0].parent_ids,
            vec![CommitId::from(main), CommitId::from(side)]
        );
        assert_eq!(rows[3].id, CommitId::from(base));
        assert!(rows[3].parent_ids.is_empty());

        let position = |id: &CommitId| rows.iter().position(|r| &r.id == id);
        for row in &rows {
            let child = position(&row.id).unwrap();
            for parent in &row.parent_ids {
                let parent = position(parent).unwrap();
                assert!(child < parent, "children must come before parents");
            }
        }
    }

    #[test]
    fn test_list_commits_respects_limit() {
        let (_temp, repo) = init_test_repo();
        let mut tip = head(&repo);
        for i in 0..5 {
            tip = commit_on(&repo, "HEAD", &format!("Commit {i}"), &[tip]);
        }

        let query = CommitQuery {
            max_commits: 3,
            ..CommitQuery::default()
        };
        let rows = repo.list_commits(&query).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].summary, "Commit 4");
        // The oldest listed commit points outside the window.
        assert_eq!(rows[2].parent_ids.len(), 1);
    }

    #[test]
    fn test_list_commits_uncommitted_rows() {
        let (temp, repo) = init_test_repo();
        let tip = head(&repo);

        fs::write(temp.path().join("untracked.txt"), "content").unwrap();
        fs::write(temp.path().join("staged.txt"), "content").unwrap();
        let mut index = repo.inner().index().unwrap();
        index.add_path(Path::new("staged.txt")).unwrap();
        index.write().unwrap();

        let rows = repo.list_commits(&CommitQuery::default()).unwrap();
        assert_eq!(rows[0].kind, CommitKind::Unstaged);
        assert_eq!(rows[0].parent_ids, vec![CommitId::from(tip)]);
        assert_eq!(rows[1].kind, CommitKind::Staged);
        assert_eq!(rows[2].id, CommitId::from(tip));

        let quiet = CommitQuery {
            include_uncommitted: false,
            ..CommitQuery::default()
        };
        let rows = repo.list_commits(&quiet).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_list_commits_stash_rows() {
        let (temp, mut repo) = init_test_repo();
        fs::write(temp.path().join("notes.txt"), "base").unwrap();
        let mut index = repo.inner().index().unwrap();
        index.add_path(Path::new("notes.txt")).unwrap();
        index.write().unwrap();
        let base = commit_on(&repo, "HEAD", "Add notes", &[head(&repo)]);

        let sig = Signature::now("Test User", "test@example.com").unwrap();
        fs::write(temp.path().join("notes.txt"), "first").unwrap();
        let first = repo.inner.stash_save(&sig, "first", None).unwrap();
        fs::write(temp.path().join("notes.txt"), "second").unwrap();
        let second = repo.inner.stash_save(&sig, "second", None).unwrap();

        let rows = repo.list_commits(&CommitQuery::default()).unwrap();
        assert_eq!(rows.len(), 4);

        assert_eq!(rows[0].id, CommitId::from(second));
        assert_eq!(rows[0].kind, CommitKind::Stash);
        assert_eq!(rows[0].parent_ids, vec![CommitId::from(base)]);
        assert!(rows[0].summary.contains("second"));

        assert_eq!(rows[1].id, CommitId::from(first));
        assert_eq!(rows[1].kind, CommitKind::Stash);
        assert_eq!(rows[1].parent_ids, vec![CommitId::from(base)]);

        assert_eq!(rows[2].id, CommitId::from(base));
        assert_eq!(rows[2].kind, CommitKind::Commit);

        let without = CommitQuery {
            include_stashes: false,
            ..CommitQuery::default()
        };
        let rows = repo.list_commits(&without).unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.kind == CommitKind::Commit));
    }

    #[test]
    fn test_bare_repository_has_no_uncommitted_rows() {
        let temp = TempDir::new().unwrap();
        let inner = git2::Repository::init_bare(temp.path()).unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = inner.treebuilder(None).unwrap().write().unwrap();
        {
            let tree = inner.find_tree(tree_id).unwrap();
            inner
                .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
                .unwrap();
        }
        let repo = Repository { inner };

        assert!(repo.workdir().is_none());
        let rows = repo.list_commits(&CommitQuery::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, CommitKind::Commit);
    }

    #[test]
    fn test_list_commits_marks_shallow_boundary() {
        let (_temp, repo) = init_test_repo();
        let tip = head(&repo);
        fs::write(repo.git_dir().join("shallow"), format!("{tip}\n")).unwrap();

        let rows = repo.list_commits(&CommitQuery::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].shallow);
    }

    #[test]
    fn test_open_outside_repository() {
        let temp = TempDir::new().unwrap();
        let err = Repository::open(temp.path()).unwrap_err();
        assert!(matches!(err, Error::NotARepository));
    }
}
