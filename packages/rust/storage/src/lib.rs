//! JSON data-directory storage layer.
//!
//! The [`DataStore`] persists every intermediate record set and the final
//! snapshot as pretty-printed JSON files under one data directory:
//!
//! ```text
//! <root>/
//! ├── <repo>/pulls.json            per tracked repository
//! ├── github-profiles.json
//! ├── user-assignment-infos.json
//! └── app-data.json                the consolidated snapshot
//! ```
//!
//! Reads of missing files are errors; `has_*` probes support the CLI's
//! skip-if-already-fetched behavior.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use courseboard_shared::{
    AssignmentResult, CourseboardError, ProfileRecord, PullRequestRecord, Result, Snapshot,
};

/// File name for per-repository pull records.
const PULLS_FILE: &str = "pulls.json";
/// File name for the flat profile record set.
const PROFILES_FILE: &str = "github-profiles.json";
/// File name for the ordered assignment-result stream.
const RESULTS_FILE: &str = "user-assignment-infos.json";
/// File name for the consolidated snapshot.
const SNAPSHOT_FILE: &str = "app-data.json";

/// Handle over the data directory.
#[derive(Debug, Clone)]
pub struct DataStore {
    root: PathBuf,
}

impl DataStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // -----------------------------------------------------------------------
    // Pull records (per repository)
    // -----------------------------------------------------------------------

    /// Whether pulls for `repo` were already fetched.
    pub fn has_pulls(&self, repo: &str) -> bool {
        self.pulls_path(repo).exists()
    }

    /// Persist one repository's pull records.
    pub fn write_pulls(&self, repo: &str, pulls: &[PullRequestRecord]) -> Result<()> {
        self.write_json(&self.pulls_path(repo), &pulls)
    }

    /// Load one repository's pull records.
    pub fn read_pulls(&self, repo: &str) -> Result<Vec<PullRequestRecord>> {
        self.read_json(&self.pulls_path(repo))
    }

    /// Load pull records for every repo, preserving the given repo order.
    /// Every repository must have been fetched first.
    pub fn read_all_pulls(&self, repos: &[String]) -> Result<Vec<Vec<PullRequestRecord>>> {
        repos.iter().map(|repo| self.read_pulls(repo)).collect()
    }

    fn pulls_path(&self, repo: &str) -> PathBuf {
        self.root.join(repo).join(PULLS_FILE)
    }

    // -----------------------------------------------------------------------
    // Profiles
    // -----------------------------------------------------------------------

    pub fn has_profiles(&self) -> bool {
        self.root.join(PROFILES_FILE).exists()
    }

    pub fn write_profiles(&self, profiles: &[ProfileRecord]) -> Result<()> {
        self.write_json(&self.root.join(PROFILES_FILE), &profiles)
    }

    pub fn read_profiles(&self) -> Result<Vec<ProfileRecord>> {
        self.read_json(&self.root.join(PROFILES_FILE))
    }

    // -----------------------------------------------------------------------
    // Assignment results
    // -----------------------------------------------------------------------

    pub fn has_assignment_results(&self) -> bool {
        self.root.join(RESULTS_FILE).exists()
    }

    pub fn write_assignment_results(&self, results: &[AssignmentResult]) -> Result<()> {
        self.write_json(&self.root.join(RESULTS_FILE), &results)
    }

    pub fn read_assignment_results(&self) -> Result<Vec<AssignmentResult>> {
        self.read_json(&self.root.join(RESULTS_FILE))
    }

    // -----------------------------------------------------------------------
    // Snapshot
    // -----------------------------------------------------------------------

    /// Write the consolidated snapshot atomically (temp file, then rename).
    pub fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let target = self.root.join(SNAPSHOT_FILE);
        let temp = self.root.join(format!(".{SNAPSHOT_FILE}.tmp"));

        self.write_json(&temp, snapshot)?;
        std::fs::rename(&temp, &target).map_err(|e| CourseboardError::io(&target, e))?;

        info!(path = %target.display(), "snapshot written");
        Ok(())
    }

    pub fn read_snapshot(&self) -> Result<Snapshot> {
        self.read_json(&self.root.join(SNAPSHOT_FILE))
    }

    // -----------------------------------------------------------------------
    // JSON helpers
    // -----------------------------------------------------------------------

    fn write_json<T: serde::Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CourseboardError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| CourseboardError::validation(format!("JSON serialization failed: {e}")))?;
        std::fs::write(path, json).map_err(|e| CourseboardError::io(path, e))?;

        debug!(path = %path.display(), "wrote JSON file");
        Ok(())
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CourseboardError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            CourseboardError::validation(format!("invalid JSON at {}: {e}", path.display()))
        })
    }
}
