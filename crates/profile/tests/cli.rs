// ABOUTME: Integration tests for the mal-profile CLI binary.
// ABOUTME: Tests file and stdin input, JSON output, output files, and failure exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn profile_cmd() -> Command {
    Command::cargo_bin("mal-profile").unwrap()
}

fn fixture_path(name: &str) -> String {
    format!(
        "{}/tests/fixtures/html/{}.html",
        env!("CARGO_MANIFEST_DIR"),
        name
    )
}

#[test]
fn summary_from_file() {
    profile_cmd()
        .arg("--html")
        .arg(fixture_path("profile_minimal"))
        .assert()
        .success()
        .stdout(predicate::str::contains("bob <https://example.test/users/bob>"))
        .stdout(predicate::str::contains("Joined: Jan 2020"));
}

#[test]
fn json_from_file() {
    let output = profile_cmd()
        .arg("--html")
        .arg(fixture_path("profile_full"))
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["username"], "Nagisa_K");
    assert_eq!(json["anime_stats"]["total_entries"], 1468);
    assert_eq!(json["manga_stats"]["volumes_read"], 512);
}

#[test]
fn reads_stdin_when_no_file_given() {
    let html = fs::read_to_string(fixture_path("profile_minimal")).unwrap();
    profile_cmd()
        .arg("--json")
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"username\": \"bob\""));
}

#[test]
fn about_format_text() {
    let html = r#"<html><head><meta property="og:url" content="https://example.test/users/dee"></head><body>
        <div class="user-image"><img src="http://x/d.png"></div>
        <span>Joined</span><span>2001</span><span>Last Online</span><span>Now</span>
        <div class="profile-about-user js-truncate-inner"><b>Line one</b><br>Line two</div>
        </body></html>"#;
    profile_cmd()
        .arg("--about-format")
        .arg("text")
        .write_stdin(html)
        .assert()
        .success()
        .stdout(predicate::str::contains("Line one\nLine two"));
}

#[test]
fn writes_output_file() {
    let temp_dir = TempDir::new().unwrap();
    let out_path = temp_dir.path().join("profile.json");

    profile_cmd()
        .arg("--html")
        .arg(fixture_path("profile_minimal"))
        .arg("--json")
        .arg("-o")
        .arg(&out_path)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("\"join_date\": \"Jan 2020\""));
}

#[test]
fn missing_required_field_exits_nonzero() {
    profile_cmd()
        .write_stdin("<html><body><p>not a profile</p></body></html>")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("profile_url"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn missing_file_exits_nonzero() {
    profile_cmd()
        .arg("--html")
        .arg("/nonexistent/profile.html")
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading"));
}

#[test]
fn timing_prints_elapsed() {
    profile_cmd()
        .arg("--html")
        .arg(fixture_path("profile_minimal"))
        .arg("--timing")
        .assert()
        .success()
        .stderr(predicate::str::contains("elapsed:"));
}
