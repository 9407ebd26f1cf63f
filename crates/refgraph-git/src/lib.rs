//! # refgraph-git
//!
//! Read-only repository feed for refgraph, built on git2-rs.
//! Lists references with their tracking counts, walks history in
//! topological order and reports the current HEAD branch.

mod error;
mod repository;
mod traits;
mod types;

pub use error::{Error, Result};
pub use git2::Oid;
pub use repository::Repository;
pub use traits::{CommitQuery, HistoryFeed};
pub use types::{CommitEntry, CommitId, CommitKind, RefKind, Reference};
