//! [`TestProject`] builder for a local project kept in sync with a template.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::git;

/// A temporary project directory with helpers for setup and assertions.
///
/// # Example
///
/// ```rust,no_run
/// use syncrepo_test_utils::project::TestProject;
///
/// let project = TestProject::new();
/// project.init_git();
/// project.write_descriptor("https://example.com/template.git", "main", None);
/// project.assert_file_exists("syncrepo.json");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Initialise a git repository with one commit so the tree starts clean.
    pub fn init_git(&self) {
        git::init_repo(self.root());
        git::commit_all(self.root(), "Initial commit");
    }

    /// Commit everything currently in the working tree.
    pub fn commit_all(&self) {
        git::commit_all(self.root(), "Update");
    }

    /// Make `url` resolve to the repository at `target` for git commands run
    /// inside this project, so network-style remotes can point at fixtures.
    pub fn alias_remote(&self, url: &str, target: &Path) {
        let key = format!("url.{}.insteadOf", target.display());
        git::run_git(self.root(), &["config", &key, url]);
    }

    /// Write `syncrepo.json` with the given fields.
    pub fn write_descriptor(&self, remote: &str, branch: &str, prefix: Option<&str>) {
        let mut record = serde_json::json!({ "remote": remote, "branch": branch });
        if let Some(prefix) = prefix {
            record["prefix"] = serde_json::Value::String(prefix.to_string());
        }
        fs::write(
            self.root().join("syncrepo.json"),
            serde_json::to_string_pretty(&record).unwrap(),
        )
        .unwrap();
    }

    /// Read `syncrepo.json` as JSON.
    pub fn read_descriptor(&self) -> serde_json::Value {
        let content = fs::read_to_string(self.root().join("syncrepo.json"))
            .expect("syncrepo.json should exist");
        serde_json::from_str(&content).expect("syncrepo.json should be valid JSON")
    }

    /// Write a file relative to the root, creating parents.
    pub fn write_file(&self, path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Read a file relative to the root.
    pub fn read_file(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` has exactly `content`.
    pub fn assert_file_eq(&self, path: &str, content: &str) {
        let actual = self.read_file(path);
        assert_eq!(
            actual, content,
            "File {} has unexpected content",
            path
        );
    }
}
