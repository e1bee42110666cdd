//! CLI binary integration tests using assert_cmd
//!
//! These tests invoke the actual binary against a fake Linux home directory
#![cfg(target_os = "linux")]

mod common;

use std::process::Command;

use assert_cmd::prelude::*;
use common::{HomeDirBuilder, chrome_visits, chromium_bookmarks_json};
use predicates::prelude::*;

fn cmd(home: &std::path::Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_browser-history"));
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn fixture_home() -> tempfile::TempDir {
    let json = chromium_bookmarks_json();
    HomeDirBuilder::new()
        .with_firefox_profile("abcd.default-release")
        .with_chrome_profile("Default", &chrome_visits(), Some(&json))
        .build()
}

#[test]
fn test_cli_history_csv_by_default() {
    let home = fixture_home();
    cmd(home.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Timestamp,URL,Title\r\n"))
        .stdout(predicate::str::contains(common::FIRST_HISTORY_URL))
        .stdout(predicate::str::contains("https://github.com/"));
}

#[test]
fn test_cli_all_browsers_bookmarks() {
    let home = fixture_home();
    cmd(home.path())
        .args(["--browser", "all", "--type", "bookmarks"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Timestamp,URL,Title,Folder\r\n"))
        .stdout(predicate::str::contains("https://forums.fedoraforum.org/"))
        .stdout(predicate::str::contains("https://crates.io/"));
}

#[test]
fn test_cli_single_browser_json() {
    let home = fixture_home();
    let output = cmd(home.path()).args(["-b", "chrome", "-f", "JSON"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let history = json["history"].as_array().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0]["URL"], "https://github.com/");
}

#[test]
fn test_cli_jsonl_format() {
    let home = fixture_home();
    let output = cmd(home.path()).args(["-b", "firefox", "-t", "bookmarks", "-f", "jsonl"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 30);
}

#[test]
fn test_cli_output_file_infers_format() {
    let home = fixture_home();
    let out = home.path().join("export.json");
    cmd(home.path()).args(["-b", "firefox", "-o"]).arg(&out).assert().success().stdout(predicate::str::is_empty());

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["history"].as_array().unwrap().len(), 5);
}

#[test]
fn test_cli_output_file_unknown_extension_falls_back_to_csv() {
    let home = fixture_home();
    let out = home.path().join("export.txt");
    cmd(home.path()).args(["-b", "firefox", "-o"]).arg(&out).assert().success();

    let text = std::fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("Timestamp,URL,Title\r\n"));
}

#[test]
fn test_cli_profile_selection() {
    let home = fixture_home();
    cmd(home.path())
        .args(["-b", "chrome", "-p", "Default", "-t", "bookmarks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://www.rust-lang.org/"));
}

#[test]
fn test_cli_show_profiles() {
    let home = fixture_home();
    cmd(home.path())
        .args(["--show-profiles", "firefox"])
        .assert()
        .success()
        .stdout(predicate::str::diff("abcd.default-release\n"));
}

#[test]
fn test_cli_show_profiles_all_is_rejected() {
    let home = fixture_home();
    cmd(home.path()).args(["--show-profiles", "all"]).assert().code(1);
}

#[test]
fn test_cli_show_profiles_without_profile_support() {
    let home = fixture_home();
    cmd(home.path())
        .args(["--show-profiles", "opera"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Opera browser does not support profiles"));
}

#[test]
fn test_cli_unknown_type() {
    let home = fixture_home();
    cmd(home.path())
        .args(["-t", "passwords"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Type passwords is unavailable"));
}

#[test]
fn test_cli_unknown_format() {
    let home = fixture_home();
    cmd(home.path())
        .args(["-f", "xml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid format xml"));
}

#[test]
fn test_cli_unknown_browser() {
    let home = fixture_home();
    cmd(home.path())
        .args(["-b", "netscape"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("netscape browser is unavailable"));
}

#[test]
fn test_cli_profile_with_all_browsers_is_syntax_error() {
    let home = fixture_home();
    cmd(home.path()).args(["-p", "Default"]).assert().code(2);
}

#[test]
fn test_cli_missing_profile() {
    let home = fixture_home();
    cmd(home.path())
        .args(["-b", "firefox", "-p", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Profile 'nope' not found in Firefox browser"));
}

#[test]
fn test_cli_named_browser_unsupported_on_platform() {
    let home = fixture_home();
    cmd(home.path())
        .args(["-b", "safari", "-t", "bookmarks"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Safari browser is not supported on Linux"));
}

#[test]
fn test_cli_malformed_flag() {
    let home = fixture_home();
    cmd(home.path()).arg("--frobnicate").assert().code(2);
}

#[test]
fn test_cli_help_flag() {
    Command::new(env!("CARGO_BIN_EXE_browser-history"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract history and bookmarks"))
        .stdout(predicate::str::contains("--show-profiles"));
}

#[test]
fn test_cli_version_flag() {
    Command::new(env!("CARGO_BIN_EXE_browser-history"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_cli_json_timestamps_carry_numeric_offset() {
    let home = fixture_home();
    let output = cmd(home.path()).env("TZ", "UTC0").args(["-b", "firefox", "-f", "json"]).output().unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["history"][0]["Timestamp"], "2020-08-02T18:59:04+00:00");
}

#[test]
fn test_cli_jsonl_timestamps_in_local_zone() {
    let home = fixture_home();
    cmd(home.path())
        .env("TZ", "IST-5:30")
        .args(["-b", "firefox", "-t", "bookmarks", "-f", "jsonl"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            r#"{"Timestamp":"2005-11-03T03:14:56+05:30","URL":"https://forums.fedoraforum.org/","Title":"Fedora Forum","Folder":"User Communities"}"#,
        ));
}

#[test]
fn test_cli_debug_log_names_columns() {
    let home = fixture_home();
    cmd(home.path())
        .env("RUST_LOG", "debug")
        .args(["-b", "firefox", "-t", "bookmarks"])
        .assert()
        .success()
        .stderr(predicate::str::contains("fetching bookmarks as csv with columns Timestamp,URL,Title,Folder"));
}
