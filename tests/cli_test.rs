#![allow(deprecated)]

//! Binary-level tests: argument handling, config validation, and a
//! non-interactive export against a mock server

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::*;

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("todoist-log").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--since"))
        .stdout(predicate::str::contains("--no-pause"));
}

#[test]
fn test_invalid_config_rejected() {
    let (_temp_dir, config_path) = temp_config_file("api:\n  page_size: 0\n");

    let mut cmd = Command::cargo_bin("todoist-log").unwrap();
    cmd.arg("--config")
        .arg(config_path)
        .arg("--no-pause")
        .env_remove("TODOIST_API_TOKEN");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("page_size must be greater than 0"));
}

#[test]
fn test_bad_since_flag_fails() {
    let out = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("todoist-log").unwrap();
    cmd.args(["--config", "/nonexistent/config.yaml", "--no-pause"])
        .args(["--token", "t", "--since", "last tuesday"])
        .arg("--output-dir")
        .arg(out.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("last tuesday"));
    assert!(files_in(&out).is_empty());
}

#[test]
fn test_fatal_error_reported_once() {
    let mut cmd = Command::cargo_bin("todoist-log").unwrap();
    cmd.args(["--config", "/nonexistent/config.yaml", "--no-pause"])
        .args(["--token", "t", "--since", "last tuesday"])
        .env_remove("RUST_LOG")
        .env_remove("RUST_BACKTRACE");

    let output = cmd.output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("Invalid timestamp 'last tuesday'").count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_interactive_export_writes_report() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(COMPLETED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": {"1": {"name": "Home"}},
            "sections": {},
            "items": [item("2023-01-01T08:00:00Z", Some("1"), "Water plants", &["twice"])]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(COMPLETED_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(&server)
        .await;

    let mut cmd = Command::cargo_bin("todoist-log").unwrap();
    cmd.args(["--config", "/nonexistent/config.yaml", "--no-pause"])
        .args(["--token", "secret"])
        .args(["--since", "2023-01-01T00:00:00"])
        .args(["--until", "2023-01-02T23:59:59"])
        .arg("--output-dir")
        .arg(out.path())
        .env("TODOIST_LOG_BASE_URL", server.uri());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("communicating with Todoist server..."))
        .stdout(predicate::str::contains(
            "completed tasks written to 'todoist_2023-01-01T00-00-00_2023-01-02T23-59-59.TXT'",
        ))
        .stdout(predicate::str::contains("secret").not());

    let text = std::fs::read_to_string(
        out.path()
            .join("todoist_2023-01-01T00-00-00_2023-01-02T23-59-59.TXT"),
    )
    .unwrap();
    assert_eq!(text, "2023-01-01T08:00:00Z\tHome\t\tWater plants\t\"twice\"");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_interactive_forbidden_prints_message() {
    let server = MockServer::start().await;
    let out = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path(COMPLETED_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut cmd = Command::cargo_bin("todoist-log").unwrap();
    cmd.args(["--config", "/nonexistent/config.yaml", "--no-pause"])
        .args(["--token", "expired"])
        .args(["--since", "2023-01-01T00:00:00"])
        .args(["--until", "2023-01-02T23:59:59"])
        .arg("--output-dir")
        .arg(out.path())
        .env("TODOIST_LOG_BASE_URL", server.uri());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Invalid API token"));
    assert!(files_in(&out).is_empty());
}
