//! Git repository fixtures.
//!
//! Fixtures shell out to the `git` CLI for writes (the same binary the
//! gateway uses) and read state back through `git2`.

use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run `git <args>` in `dir`, panicking with stderr on failure.
pub fn run_git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Initialise a git repository on branch `main` with a test identity.
///
/// No commit is made.
pub fn init_repo(path: &Path) {
    run_git(path, &["init", "--quiet"]);
    run_git(path, &["config", "user.email", "test@test.com"]);
    run_git(path, &["config", "user.name", "Test User"]);
    run_git(path, &["config", "commit.gpgsign", "false"]);
    run_git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
}

/// Stage everything and commit. Returns the new HEAD hash.
pub fn commit_all(path: &Path, message: &str) -> String {
    run_git(path, &["add", "--all"]);
    run_git(path, &["commit", "--quiet", "--allow-empty", "-m", message]);
    head_commit(path)
}

/// Read the HEAD commit hash through `git2`.
pub fn head_commit(path: &Path) -> String {
    let repo = git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("failed to open repository at {}: {e}", path.display()));
    let commit = repo
        .head()
        .and_then(|head| head.peel_to_commit())
        .unwrap_or_else(|e| panic!("repository at {} has no HEAD commit: {e}", path.display()));
    commit.id().to_string()
}

/// A template repository on branch `main` living in a temp directory.
///
/// # Example
///
/// ```rust,no_run
/// use syncrepo_test_utils::git::TemplateRepo;
///
/// let template = TemplateRepo::new();
/// template.write("README.md", "# Template");
/// let commit = template.commit("Initial");
/// ```
pub struct TemplateRepo {
    temp_dir: TempDir,
}

impl Default for TemplateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRepo {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("TemplateRepo: failed to create temp dir");
        init_repo(temp_dir.path());
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Location usable as a fetch URL by the git CLI.
    pub fn url(&self) -> String {
        self.root().to_string_lossy().to_string()
    }

    /// Write a file relative to the template root, creating parents.
    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) {
        let full_path = self.root().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }

    /// Delete a file relative to the template root.
    pub fn remove(&self, path: &str) {
        fs::remove_file(self.root().join(path)).unwrap();
    }

    /// Commit all changes on `main`. Returns the commit hash.
    pub fn commit(&self, message: &str) -> String {
        commit_all(self.root(), message)
    }

    pub fn head(&self) -> String {
        head_commit(self.root())
    }
}
