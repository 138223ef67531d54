//! CLI end-to-end tests that invoke the compiled `syncrepo` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use syncrepo_test_utils::git::TemplateRepo;
use syncrepo_test_utils::project::TestProject;

const URL: &str = "https://template.invalid/repo.git";

/// Get a Command for the syncrepo binary running in `dir`.
fn syncrepo(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("syncrepo"));
    cmd.current_dir(dir)
        .env_remove("SYNCREPO_CONFIG")
        .env_remove("RUST_LOG")
        .env_remove("CLICOLOR_FORCE")
        .env("NO_COLOR", "1");
    // Keep git from discovering a repository above the temp dir
    if let Some(parent) = dir.parent() {
        cmd.env("GIT_CEILING_DIRECTORIES", parent);
    }
    cmd
}

fn template() -> TemplateRepo {
    let template = TemplateRepo::new();
    template.write(".syncrepoignore", "secrets/\n");
    template.write("a.txt", "alpha\n");
    template.write("secrets/key.pem", "PRIVATE\n");
    template.commit("Initial template");
    template
}

/// Clean project repository whose `URL` points at `template`.
fn project_for(template: &TemplateRepo) -> TestProject {
    let project = TestProject::new();
    project.init_git();
    project.alias_remote(URL, template.root());
    project.write_descriptor(URL, "main", None);
    project.commit_all();
    project
}

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn test_help_output() {
    let dir = tempfile::tempdir().unwrap();
    syncrepo(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("template repository"));
}

#[test]
fn test_version_output() {
    let dir = tempfile::tempdir().unwrap();
    syncrepo(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("syncrepo"));
}

// ============================================================================
// init
// ============================================================================

#[test]
fn test_init_rejects_local_remote() {
    let project = TestProject::new();
    syncrepo(project.root())
        .args(["init", "--remote", "/srv/template"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Local template remotes are not supported"));

    project.assert_file_not_exists("syncrepo.json");
}

#[test]
fn test_init_writes_descriptor() {
    let template = template();
    let project = TestProject::new();
    project.init_git();
    project.alias_remote(URL, template.root());

    syncrepo(project.root())
        .args(["init", "-r", URL, "--prefix", "templates/basic"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized template from"));

    let descriptor = project.read_descriptor();
    assert_eq!(descriptor["remote"], URL);
    assert_eq!(descriptor["branch"], "main");
    assert_eq!(descriptor["commit"], template.head());
    assert_eq!(descriptor["prefix"], "templates/basic");
}

#[test]
fn test_init_unknown_branch_fails() {
    let template = template();
    let project = TestProject::new();
    project.init_git();
    project.alias_remote(URL, template.root());

    syncrepo(project.root())
        .args(["init", "-r", URL, "-b", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No commit hash found for branch \"nope\""));
}

// ============================================================================
// sync
// ============================================================================

#[test]
fn test_sync_outside_repository_fails() {
    let project = TestProject::new();
    project.write_descriptor(URL, "main", None);

    syncrepo(project.root())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a git repository"))
        .stderr(predicate::str::contains("git init"));
}

#[test]
fn test_sync_without_descriptor_names_init() {
    let project = TestProject::new();
    project.init_git();

    syncrepo(project.root())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"))
        .stderr(predicate::str::contains("syncrepo init --remote <url>"));
}

#[test]
fn test_sync_dirty_tree_requires_force() {
    let template = template();
    let project = project_for(&template);
    project.write_file("scratch.txt", "uncommitted");

    syncrepo(project.root())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("uncommitted changes"))
        .stderr(predicate::str::contains("--force"));
    project.assert_file_not_exists("a.txt");

    syncrepo(project.root())
        .args(["sync", "-f"])
        .assert()
        .success();
    project.assert_file_eq("a.txt", "alpha\n");
}

#[test]
fn test_sync_prints_actions() {
    let template = template();
    let project = project_for(&template);

    syncrepo(project.root())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating: a.txt"))
        .stdout(predicate::str::contains("Ignoring: secrets/key.pem"))
        .stdout(predicate::str::contains("Sync completed successfully"));

    project.assert_file_not_exists("secrets/key.pem");
    assert_eq!(project.read_descriptor()["commit"], template.head());
}

#[test]
fn test_sync_dry_run_changes_nothing() {
    let template = template();
    let project = project_for(&template);

    syncrepo(project.root())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Creating: a.txt"))
        .stdout(predicate::str::contains("no files were changed"));

    project.assert_file_not_exists("a.txt");
    assert!(project.read_descriptor().get("commit").is_none());
}

#[test]
fn test_sync_json_report() {
    let template = template();
    let project = project_for(&template);

    let output = syncrepo(project.root())
        .args(["sync", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["dry_run"], false);
    assert_eq!(report["commit"], template.head());
    assert_eq!(report["entries"][0]["path"], "a.txt");
    assert_eq!(report["entries"][0]["kind"], "create");
    assert_eq!(report["entries"][1]["kind"], "ignore");
}

#[test]
fn test_sync_with_custom_config_path() {
    let template = template();
    let project = TestProject::new();
    project.init_git();
    project.alias_remote(URL, template.root());
    project.write_file(
        "template.yaml",
        format!("remote: {URL}\nbranch: main\n"),
    );
    project.commit_all();

    syncrepo(project.root())
        .args(["sync", "--config", "template.yaml"])
        .assert()
        .success();

    project.assert_file_eq("a.txt", "alpha\n");
    assert!(project.read_file("template.yaml").contains(&template.head()));
}

#[cfg(unix)]
#[test]
fn test_aborted_sync_still_names_applied_files() {
    let template = TemplateRepo::new();
    template.write("a.txt", "alpha\n");
    template.write("link/evil.txt", "evil\n");
    template.commit("Template with a redirected path");
    let project = project_for(&template);
    let outside = tempfile::tempdir().unwrap();
    std::os::unix::fs::symlink(outside.path(), project.root().join("link")).unwrap();

    syncrepo(project.root())
        .args(["sync", "--force"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Creating: a.txt"))
        .stderr(predicate::str::contains("Security error"));

    project.assert_file_eq("a.txt", "alpha\n");
    assert!(!outside.path().join("evil.txt").exists());
}
