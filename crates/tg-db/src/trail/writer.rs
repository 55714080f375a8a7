//! JSONL trail writer.
//!
//! Appends `TrailOperation` records to per-team `{trail_dir}/{team_id}.jsonl`
//! files. Uses `serde_jsonlines::append_json_lines` for per-line appends.

use std::path::{Path, PathBuf};

use tg_core::trail::TrailOperation;

use crate::error::DatabaseError;

/// Appends trail operations to per-team JSONL files.
///
/// `ThinkgraphService` calls `append()` after the write transaction commits,
/// so the trail only ever contains mutations that are in the database.
pub struct TrailWriter {
    trail_dir: PathBuf,
    enabled: bool,
}

impl TrailWriter {
    /// Create a new `TrailWriter` pointing at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created.
    pub fn new(trail_dir: PathBuf) -> Result<Self, DatabaseError> {
        std::fs::create_dir_all(&trail_dir).map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(Self {
            trail_dir,
            enabled: true,
        })
    }

    /// Create a disabled writer (for tests or when the trail is switched off).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            trail_dir: PathBuf::new(),
            enabled: false,
        }
    }

    pub const fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append a trail operation to the team's JSONL file.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file write fails or the team id cannot
    /// be used as a file name.
    pub fn append(&self, op: &TrailOperation) -> Result<(), DatabaseError> {
        if !self.enabled {
            return Ok(());
        }

        let path = self.team_file(&op.team)?;
        serde_jsonlines::append_json_lines(&path, [op])
            .map_err(|e| DatabaseError::Other(e.into()))?;
        Ok(())
    }

    /// Read back every operation recorded for `team_id`, oldest first.
    ///
    /// A team with no trail file yet has an empty trail.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the file exists but cannot be parsed.
    pub fn read_team(&self, team_id: &str) -> Result<Vec<TrailOperation>, DatabaseError> {
        let path = self.team_file(team_id)?;
        if !path.exists() {
            return Ok(Vec::new());
        }
        serde_jsonlines::json_lines(&path)
            .map_err(|e| DatabaseError::Other(e.into()))?
            .collect::<std::io::Result<Vec<TrailOperation>>>()
            .map_err(|e| DatabaseError::Other(e.into()))
    }

    /// The directory where trail files are stored.
    #[must_use]
    pub fn trail_dir(&self) -> &Path {
        &self.trail_dir
    }

    fn team_file(&self, team_id: &str) -> Result<PathBuf, DatabaseError> {
        if team_id.is_empty()
            || team_id.contains(['/', '\\'])
            || team_id == "."
            || team_id == ".."
        {
            return Err(DatabaseError::InvalidArgument(format!(
                "team id '{team_id}' cannot name a trail file"
            )));
        }
        Ok(self.trail_dir.join(format!("{team_id}.jsonl")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tg_core::enums::{EntityType, TrailOp};

    fn op(team: &str, id: &str) -> TrailOperation {
        TrailOperation {
            v: 1,
            ts: "2026-02-08T12:00:00Z".into(),
            team: team.into(),
            actor: "usr-1".into(),
            op: TrailOp::Create,
            entity: EntityType::Decision,
            id: id.into(),
            data: serde_json::json!({ "title": "t" }),
        }
    }

    #[test]
    fn appends_per_team_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TrailWriter::new(dir.path().join("trail")).unwrap();

        writer.append(&op("team-a", "dec-1")).unwrap();
        writer.append(&op("team-a", "dec-2")).unwrap();
        writer.append(&op("team-b", "dec-3")).unwrap();

        let a = writer.read_team("team-a").unwrap();
        assert_eq!(a.len(), 2);
        assert_eq!(a[0].id, "dec-1");
        assert_eq!(a[1].id, "dec-2");
        assert_eq!(writer.read_team("team-b").unwrap().len(), 1);
        assert!(writer.read_team("team-c").unwrap().is_empty());
    }

    #[test]
    fn disabled_writer_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = TrailWriter::new(dir.path().to_path_buf()).unwrap();
        writer.set_enabled(false);

        writer.append(&op("team-a", "dec-1")).unwrap();
        assert!(!dir.path().join("team-a.jsonl").exists());
        assert!(!TrailWriter::disabled().is_enabled());
    }

    #[test]
    fn rejects_team_ids_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let writer = TrailWriter::new(dir.path().to_path_buf()).unwrap();
        assert!(writer.append(&op("../evil", "dec-1")).is_err());
        assert!(writer.append(&op("", "dec-1")).is_err());
    }
}
