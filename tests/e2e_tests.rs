//! End-to-end tests for the gopkgdeb binary
//!
//! These tests run the compiled binary and check:
//! - Exit codes and error reporting
//! - Package name derivation
//! - Version output for a real git checkout

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn gopkgdeb() -> Command {
    Command::cargo_bin("gopkgdeb").unwrap()
}

fn git(dir: &Path, args: &[&str]) {
    let status = std::process::Command::new("git")
        .args(["-c", "commit.gpgsign=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_AUTHOR_DATE", "2018-02-04T10:00:00Z")
        .env("GIT_COMMITTER_DATE", "2018-02-04T10:00:00Z")
        .status()
        .unwrap();
    assert!(status.success(), "git {:?} failed", args);
}

fn create_repo() -> TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    git(temp_dir.path(), &["init", "-q"]);
    fs::write(temp_dir.path().join("main.go"), "package main\n").unwrap();
    git(temp_dir.path(), &["add", "main.go"]);
    git(temp_dir.path(), &["commit", "-q", "-m", "initial"]);
    temp_dir
}

mod help {
    use super::*;

    #[test]
    fn test_help_lists_commands() {
        gopkgdeb()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("version"))
            .stdout(predicate::str::contains("estimate"))
            .stdout(predicate::str::contains("search"))
            .stdout(predicate::str::contains("check-depends"))
            .stdout(predicate::str::contains("name"));
    }

    #[test]
    fn test_version_flag() {
        gopkgdeb()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("gopkgdeb "));
    }

    #[test]
    fn test_missing_command_fails() {
        gopkgdeb().assert().failure();
    }
}

mod name {
    use super::*;

    #[test]
    fn test_program_name() {
        gopkgdeb()
            .args(["name", "github.com/Debian/dh-make-golang", "--type", "program"])
            .assert()
            .success()
            .stdout("dh-make-golang\n");
    }

    #[test]
    fn test_library_name() {
        gopkgdeb()
            .args(["name", "golang.org/x/text"])
            .assert()
            .success()
            .stdout("golang-golang-x-text\n");
    }

    #[test]
    fn test_custom_program_name() {
        gopkgdeb()
            .args([
                "name",
                "github.com/foo/bar",
                "--type",
                "program",
                "--program-package-name",
                "Bar_Tool",
            ])
            .assert()
            .success()
            .stdout("bar-tool\n");
    }

    #[test]
    fn test_unknown_hoster() {
        gopkgdeb()
            .args(["name", "example.com/foo/bar"])
            .assert()
            .failure()
            .stderr(predicate::str::starts_with("Error:"));

        gopkgdeb()
            .args(["name", "example.com/foo/bar", "--allow-unknown-hoster"])
            .assert()
            .success()
            .stdout("golang-example-foo-bar\n");
    }
}

mod version {
    use super::*;

    #[test]
    fn test_untagged_snapshot() {
        let repo = create_repo();
        gopkgdeb()
            .arg("version")
            .arg(repo.path())
            .assert()
            .success()
            .stdout(predicate::str::starts_with("0.0~git20180204."));
    }

    #[test]
    fn test_tagged_release() {
        let repo = create_repo();
        git(repo.path(), &["tag", "v1.0-rc1"]);
        gopkgdeb()
            .args(["-q", "version"])
            .arg(repo.path())
            .assert()
            .success()
            .stdout("1.0~rc1\n");
    }

    #[test]
    fn test_json_resolution() {
        let repo = create_repo();
        git(repo.path(), &["tag", "v2.1.0"]);
        let output = gopkgdeb()
            .args(["version", "--json"])
            .arg(repo.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(json["version"], "2.1.0");
        assert_eq!(json["tag"], "v2.1.0");
        assert_eq!(json["is_release"], true);
    }

    #[test]
    fn test_nonexistent_directory() {
        gopkgdeb()
            .args(["version", "/nonexistent/gopkgdeb/checkout"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }
}

mod check_depends {
    use super::*;

    #[test]
    fn test_missing_directory() {
        gopkgdeb()
            .args(["check-depends", "/nonexistent/gopkgdeb/source"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error:"));
    }
}
