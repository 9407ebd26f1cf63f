//! In-memory feed for testing the refresh service.

use std::cell::RefCell;

use refgraph_git::{CommitEntry, CommitQuery, HistoryFeed, Reference, Result as GitResult};

/// Mock implementation of `HistoryFeed` serving fixed data.
pub struct MockFeed {
    pub references: Vec<Reference>,
    pub commits: Vec<CommitEntry>,
    pub head: Option<String>,
    pub queries: RefCell<Vec<CommitQuery>>,
}

impl Default for MockFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFeed {
    pub fn new() -> Self {
        Self {
            references: Vec::new(),
            commits: Vec::new(),
            head: Some("main".to_string()),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn with_references(mut self, references: Vec<Reference>) -> Self {
        self.references = references;
        self
    }

    pub fn with_commits(mut self, commits: Vec<CommitEntry>) -> Self {
        self.commits = commits;
        self
    }

    pub fn with_head(mut self, head: Option<&str>) -> Self {
        self.head = head.map(ToString::to_string);
        self
    }
}

impl HistoryFeed for MockFeed {
    fn list_references(&self) -> GitResult<Vec<Reference>> {
        Ok(self.references.clone())
    }

    fn list_commits(&self, query: &CommitQuery) -> GitResult<Vec<CommitEntry>> {
        self.queries.borrow_mut().push(query.clone());
        Ok(self
            .commits
            .iter()
            .take(query.max_commits)
            .cloned()
            .collect())
    }

    fn current_head_name(&self) -> GitResult<Option<String>> {
        Ok(self.head.clone())
    }
}
