use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("reposcore");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reposcore"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("reposcore");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("top"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn test_top_help_lists_filters() {
    let mut cmd = cargo_bin_cmd!("reposcore");
    cmd.args(["top", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--language"))
        .stdout(predicate::str::contains("--created-after"))
        .stdout(predicate::str::contains("--limit"));
}

#[test]
fn test_invalid_created_after_is_rejected() {
    let mut cmd = cargo_bin_cmd!("reposcore");
    cmd.args(["top", "--language", "rust", "--created-after", "01/02/2024"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("YYYY-MM-DD"));
}

#[test]
fn test_completion_bash() {
    let mut cmd = cargo_bin_cmd!("reposcore");
    cmd.args(["completion", "generate", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("complete"));
}

#[test]
fn test_completion_zsh() {
    let mut cmd = cargo_bin_cmd!("reposcore");
    cmd.args(["completion", "generate", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compdef"));
}

#[test]
fn test_auth_status_json_output() {
    let output = cargo_bin_cmd!("reposcore")
        .args(["auth", "status", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("auth status --output json should produce valid JSON");
    assert!(json["authenticated"].is_boolean());
}

#[test]
fn test_auth_status_reports_environment_token() {
    cargo_bin_cmd!("reposcore")
        .args(["auth", "status", "--output", "json"])
        .env("GH_TOKEN", "ghp_from_env")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"environment\""))
        .stdout(predicate::str::contains("ghp_from_env").not());
}

#[test]
fn test_unreachable_api_reports_failure() {
    cargo_bin_cmd!("reposcore")
        .args([
            "top",
            "--language",
            "rust",
            "--created-after",
            "2024-01-01",
            "--base-url",
            "http://127.0.0.1:1",
            "--output",
            "json",
        ])
        .env("REPOSCORE_SEARCH__MAX_RETRIES", "1")
        .env("GH_TOKEN", "ghp_test")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to fetch page 1 after 1 attempts"));
}
