use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// A `bark` command isolated from the caller's environment and config file
fn bark(config_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bark").unwrap();
    cmd.env_remove("BARK_KEY")
        .env_remove("BARK_SERVER")
        .env_remove("BARK_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--config")
        .arg(config_path);
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("bark").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Send push notifications"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("bark").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bark"));
}

#[test]
fn test_init_command() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nested/config.toml");

    bark(&config_path)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));
    assert!(config_path.exists());

    bark(&config_path)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Use --force to overwrite"));

    bark(&config_path).args(["init", "--force"]).assert().success();
}

#[test]
fn test_config_set_and_get() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    bark(&config_path)
        .args(["config", "set", "defaults.group", "ops"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration updated: defaults.group = ops"));

    bark(&config_path)
        .args(["config", "get", "defaults.group"])
        .assert()
        .success()
        .stdout(predicate::str::diff("ops\n"));

    bark(&config_path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("group = \"ops\""));
}

#[test]
fn test_config_rejects_bad_values() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    bark(&config_path)
        .args(["config", "set", "defaults.level", "urgent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value for 'defaults.level'"));

    bark(&config_path)
        .args(["config", "get", "bark.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration key"));
    assert!(!config_path.exists());
}

#[test]
fn test_send_dry_run_get() {
    let temp_dir = TempDir::new().unwrap();

    bark(&temp_dir.path().join("config.toml"))
        .args(["send", "Body", "--title", "Title", "--key", "k", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Dry run - would send GET https://api.day.app/k/Title/Body",
        ));
}

#[test]
fn test_send_dry_run_post_uses_config_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    bark(&config_path)
        .args(["config", "set", "defaults.sound", "alarm"])
        .assert()
        .success();

    bark(&config_path)
        .args(["send", "Body", "--post", "--archive", "--dry-run"])
        .env("BARK_KEY", "k")
        .assert()
        .success()
        .stdout(predicate::str::contains("would send POST https://api.day.app/k"))
        .stdout(predicate::str::contains(r#""sound":"alarm""#))
        .stdout(predicate::str::contains(r#""isArchive":true"#));
}

#[test]
fn test_send_without_key_fails() {
    let temp_dir = TempDir::new().unwrap();

    bark(&temp_dir.path().join("config.toml"))
        .args(["send", "Body"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bark key cannot be empty"));
}

#[test]
fn test_send_zero_timeout_rejected() {
    let temp_dir = TempDir::new().unwrap();

    bark(&temp_dir.path().join("config.toml"))
        .args(["send", "Body", "--key", "k", "--timeout", "0", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--timeout"));

    bark(&temp_dir.path().join("config.toml"))
        .args(["send", "Body", "--key", "k", "--timeout", "5", "--dry-run"])
        .assert()
        .success();
}

#[test]
fn test_send_dot_body_rejected_for_get() {
    let temp_dir = TempDir::new().unwrap();

    bark(&temp_dir.path().join("config.toml"))
        .args(["send", ".", "--key", "k", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("body cannot be '.' when sending with GET"));

    bark(&temp_dir.path().join("config.toml"))
        .args(["send", ".", "--key", "k", "--post", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""body":".""#));
}

#[test]
fn test_send_invalid_level_fails() {
    let temp_dir = TempDir::new().unwrap();

    bark(&temp_dir.path().join("config.toml"))
        .args(["send", "Body", "--key", "k", "--level", "urgent", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid level value 'urgent'"));
}

#[test]
fn test_send_against_gateway() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/k/Title/Body")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":200,"message":"success","timestamp":1700000000}"#)
        .create();

    let temp_dir = TempDir::new().unwrap();
    bark(&temp_dir.path().join("config.toml"))
        .args(["send", "Body", "--title", "Title", "--key", "k", "--server"])
        .arg(server.url())
        .assert()
        .success()
        .stdout(predicate::str::contains("Notification sent: 200 success"))
        .stdout(predicate::str::contains("Handled at: 2023-11-14"));

    mock.assert();
}

#[test]
fn test_send_reports_gateway_rejection() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/k/Body")
        .with_status(200)
        .with_body(r#"{"code":400,"message":"device not found"}"#)
        .create();

    let temp_dir = TempDir::new().unwrap();
    bark(&temp_dir.path().join("config.toml"))
        .args(["send", "Body", "--key", "k", "--server"])
        .arg(server.url())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to send notification"))
        .stderr(predicate::str::contains("API error: device not found"));
}
