//! End-to-end tests for the depfix CLI
//!
//! These tests verify:
//! - In-place, `--out` and stdin/stdout writing
//! - Dry-run mode leaves files unchanged
//! - JSON report schema
//! - Exit codes for updates, no changes and failures

use assert_cmd::Command;
use mockito::{Server, ServerGuard};
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Start a mock index serving a few packages
fn mock_index() -> ServerGuard {
    let mut server = Server::new();
    let packages = [
        (
            "fastapi",
            r#"{"info": {"version": "0.115.0"}, "releases": {
                "0.85.0": [{"requires_python": ">=3.7"}],
                "0.109.0": [{"requires_python": ">=3.8"}],
                "0.115.0": [{"requires_python": ">=3.12"}]
            }}"#,
        ),
        (
            "uvicorn",
            r#"{"releases": {"0.18.0": [], "0.30.6": []}}"#,
        ),
        (
            "requests",
            r#"{"releases": {"2.31.0": [], "2.32.5": []}}"#,
        ),
    ];
    for (name, body) in packages {
        server
            .mock("GET", format!("/pypi/{}/json", name).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();
    }
    server
        .mock("GET", "/pypi/ghost/json")
        .with_status(404)
        .create();
    server
}

fn depfix(server: &ServerGuard) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_depfix"));
    cmd.env_remove("DEPFIX_LOG")
        .env("NO_COLOR", "1")
        .args(["--index-url", server.url().as_str(), "--quiet"]);
    cmd
}

fn write_manifest(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("requirements.txt");
    fs::write(&path, content).unwrap();
    path
}

mod write_tests {
    use super::*;

    #[test]
    fn test_in_place_update() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "fastapi>=0.85.0  # web\nuvicorn\n");

        depfix(&server).arg(&path).arg("--in-place").assert().success();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "fastapi==0.115.0  # web\nuvicorn==0.30.6\n"
        );
    }

    #[test]
    fn test_target_python_filters_releases() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "fastapi>=0.85.0\n");

        depfix(&server)
            .arg(&path)
            .args(["-i", "--python", "3.11"])
            .assert()
            .success();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fastapi==0.109.0\n");
    }

    #[test]
    fn test_out_file() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "requests\n");
        let out = dir.path().join("locked.txt");

        depfix(&server)
            .arg(&path)
            .arg("--out")
            .arg(&out)
            .assert()
            .success();

        assert_eq!(fs::read_to_string(&out).unwrap(), "requests==2.32.5\n");
        assert_eq!(fs::read_to_string(&path).unwrap(), "requests\n");
    }

    #[test]
    fn test_stdin_to_stdout() {
        let server = mock_index();

        depfix(&server)
            .arg("-")
            .write_stdin("uvicorn>=0.18.0\n")
            .assert()
            .success()
            .stdout("uvicorn==0.30.6\n");
    }

    #[test]
    fn test_missing_destination_fails() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "requests\n");

        depfix(&server)
            .arg(&path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Specify --in-place, --out, or --dry-run"));
    }
}

mod dry_run_tests {
    use super::*;

    #[test]
    fn test_dry_run_prints_diff_and_leaves_file() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "uvicorn>=0.18.0\n");

        depfix(&server)
            .arg(&path)
            .arg("--dry-run")
            .assert()
            .success()
            .stdout(predicate::str::contains("-uvicorn>=0.18.0"))
            .stdout(predicate::str::contains("+uvicorn==0.30.6"));

        assert_eq!(fs::read_to_string(&path).unwrap(), "uvicorn>=0.18.0\n");
    }

    #[test]
    fn test_json_format() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "fastapi==0.85.0\n");

        let output = depfix(&server)
            .arg(&path)
            .args(["-n", "--format", "json", "--include-pinned", "--python", "3.11"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let report = &value["reports"][0];
        assert_eq!(report["name"], "fastapi");
        assert_eq!(report["current_version"], "==0.85.0");
        assert_eq!(report["chosen_version"], "0.109.0");
        assert_eq!(report["semver_delta"], "minor");
        assert!(report["reason"]
            .as_str()
            .unwrap()
            .to_lowercase()
            .contains("python 3.11"));
    }
}

mod exit_code_tests {
    use super::*;

    #[test]
    fn test_no_changes_exits_2() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "requests==2.32.5\n");

        depfix(&server)
            .arg(&path)
            .arg("--dry-run")
            .assert()
            .code(2)
            .stdout(predicate::str::contains("No updates available"));
    }

    #[test]
    fn test_no_entries_exits_0() {
        let server = mock_index();

        depfix(&server)
            .args(["-", "--engine", "python"])
            .write_stdin("# only comments\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("No dependencies found to update"));
    }

    #[test]
    fn test_missing_file_exits_1() {
        let server = mock_index();

        depfix(&server)
            .args(["/nonexistent/requirements.txt", "--dry-run"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn test_unknown_package_exits_1() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "requests\nghost>=1.0\n");

        depfix(&server)
            .arg(&path)
            .arg("--dry-run")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("package 'ghost' not found"));
    }

    #[test]
    fn test_node_manifest_is_unsupported() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"dependencies": {"express": "^4.18.0"}}"#).unwrap();

        depfix(&server)
            .arg(&path)
            .arg("--dry-run")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("unsupported ecosystem: node"));
    }

    #[test]
    fn test_invalid_python_version_exits_1() {
        let server = mock_index();
        let dir = TempDir::new().unwrap();
        let path = write_manifest(&dir, "requests\n");

        depfix(&server)
            .arg(&path)
            .args(["--dry-run", "--python", "three"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid Python version"));
    }
}
