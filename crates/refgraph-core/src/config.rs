//! Configuration management for refgraph.

use std::fs;
use std::path::{Path, PathBuf};

use refgraph_git::CommitQuery;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::palette::{ColorPalette, DEFAULT_COLORS};

/// Config file name inside the git directory.
pub const CONFIG_FILE: &str = "refgraph.toml";

/// refgraph configuration loaded from `.git/refgraph.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root labels for the reference trees.
    #[serde(default)]
    pub labels: LabelConfig,

    /// History graph settings.
    #[serde(default)]
    pub graph: GraphConfig,
}

impl Config {
    /// Load config from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| Error::ConfigParseError {
            file: path.to_path_buf(),
            source,
        })
    }

    /// Load the config stored in a repository's git directory.
    ///
    /// # Errors
    /// Returns error if the file exists but can't be read or parsed.
    pub fn load_for(git_dir: impl AsRef<Path>) -> Result<Self> {
        Self::load(Self::path_for(git_dir))
    }

    /// Location of the config file for a git directory.
    #[must_use]
    pub fn path_for(git_dir: impl AsRef<Path>) -> PathBuf {
        git_dir.as_ref().join(CONFIG_FILE)
    }

    /// Save config to a TOML file.
    ///
    /// # Errors
    /// Returns error if serialization or write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Labels of the three tree roots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "default_local_label")]
    pub local: String,

    #[serde(default = "default_remote_label")]
    pub remote: String,

    #[serde(default = "default_tags_label")]
    pub tags: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            local: default_local_label(),
            remote: default_remote_label(),
            tags: default_tags_label(),
        }
    }
}

fn default_local_label() -> String {
    "Branches".into()
}

fn default_remote_label() -> String {
    "Remotes".into()
}

fn default_tags_label() -> String {
    "Tags".into()
}

/// History graph settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Maximum number of commits walked.
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,

    /// Lane colors as `#rrggbb`, cycled in order.
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,

    /// Show staged and unstaged changes as pseudo commits.
    #[serde(default = "default_true")]
    pub show_uncommitted: bool,

    /// Show stash entries.
    #[serde(default = "default_true")]
    pub show_stashes: bool,

    /// Walk every branch and tag, not just HEAD.
    #[serde(default = "default_true")]
    pub all_refs: bool,
}

impl GraphConfig {
    /// Build the lane palette from the configured colors.
    ///
    /// # Errors
    /// Returns [`Error::InvalidColor`] for a malformed entry.
    pub fn palette(&self) -> Result<ColorPalette> {
        ColorPalette::from_hex(&self.palette)
    }

    /// Feed query matching these settings.
    #[must_use]
    pub fn query(&self) -> CommitQuery {
        CommitQuery {
            max_commits: self.max_commits,
            all_refs: self.all_refs,
            include_uncommitted: self.show_uncommitted,
            include_stashes: self.show_stashes,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            max_commits: default_max_commits(),
            palette: default_palette(),
            show_uncommitted: true,
            show_stashes: true,
            all_refs: true,
        }
    }
}

const fn default_max_commits() -> usize {
    500
}

fn default_palette() -> Vec<String> {
    DEFAULT_COLORS.iter().map(ToString::to_string).collect()
}

const fn default_true() -> bool {
    true
}
