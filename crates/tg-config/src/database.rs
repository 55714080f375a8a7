//! Local libSQL database and JSONL trail settings.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_path() -> String {
    ".thinkgraph/thinkgraph.db".to_string()
}

const fn default_trail_enabled() -> bool {
    true
}

fn default_trail_dir() -> String {
    ".thinkgraph/trail".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database file, relative to the project root unless absolute.
    /// `:memory:` opens a throwaway in-memory database.
    #[serde(default = "default_path")]
    pub path: String,

    /// Whether committed mutations are also appended to the JSONL trail.
    #[serde(default = "default_trail_enabled")]
    pub trail_enabled: bool,

    /// Directory holding one `{team_id}.jsonl` file per team.
    #[serde(default = "default_trail_dir")]
    pub trail_dir: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            trail_enabled: default_trail_enabled(),
            trail_dir: default_trail_dir(),
        }
    }
}

impl DatabaseConfig {
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Database location resolved against `project_root`.
    #[must_use]
    pub fn resolved_path(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.path)
    }

    /// Trail directory resolved against `project_root`.
    #[must_use]
    pub fn resolved_trail_dir(&self, project_root: &Path) -> PathBuf {
        resolve(project_root, &self.trail_dir)
    }
}

fn resolve(root: &Path, value: &str) -> PathBuf {
    let path = Path::new(value);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
