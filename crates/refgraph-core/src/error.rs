//! Error types for refgraph-core.

use std::path::PathBuf;

use refgraph_git::CommitId;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in refgraph-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The commit list is not children-before-parents.
    ///
    /// This is the only failure of the lane walk; malformed reference
    /// paths and missing parents degrade gracefully instead.
    #[error("invalid input ordering at commit {commit}: {detail}")]
    InvalidInputOrdering {
        /// Commit where the violation was detected.
        commit: CommitId,
        /// What was wrong.
        detail: String,
    },

    /// A palette entry is not a `#rrggbb` color.
    #[error("invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    /// Config file parsing error.
    #[error("failed to parse {file}: {source}")]
    ConfigParseError {
        file: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config serialization error.
    #[error("toml error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Repository feed error.
    #[error("git error: {0}")]
    Git(#[from] refgraph_git::Error),
}
