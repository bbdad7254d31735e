//! End-to-end tests for the `wfdeploy` binary.
//!
//! Everything here runs without a WildFly server: argument parsing, request
//! validation, and the failure paths that trigger before any management
//! connection is attempted.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn wfdeploy() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wfdeploy"));
    cmd.env("NO_COLOR", "true");
    cmd.env_remove("WFDEPLOY_PASSWORD");
    cmd.env_remove("WFDEPLOY_CLI");
    cmd
}

// ── Help and version ──────────────────────────────────────────────────────────

#[test]
fn no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help prints help to stderr and exits 2.
    // NO_COLOR must be unset here: an env-backed arg counts as "args present"
    // and would bypass arg_required_else_help.
    wfdeploy()
        .env_remove("NO_COLOR")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Deploy WAR/EAR archives to WildFly",
        ));
}

#[test]
fn help_lists_commands() {
    wfdeploy()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("version"));
}

#[test]
fn version_flag_shows_version() {
    wfdeploy()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wfdeploy"));
}

#[test]
fn version_command_shows_version() {
    wfdeploy()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wfdeploy 0.3.0"));
}

#[test]
fn version_command_json_outputs_json() {
    wfdeploy()
        .args(["version", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"version":"0.3.0"}"#));
}

#[test]
fn unknown_command_exits_with_error() {
    wfdeploy()
        .arg("redeploy")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ── Deploy argument parsing ───────────────────────────────────────────────────

#[test]
fn deploy_requires_host() {
    wfdeploy()
        .args(["deploy", "--archive", "app.war", "--port", "9990"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--host"));
}

#[test]
fn deploy_requires_port() {
    wfdeploy()
        .args(["deploy", "--archive", "app.war", "--host", "wildfly.internal"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--port"));
}

#[test]
fn deploy_rejects_port_zero() {
    wfdeploy()
        .args([
            "deploy",
            "--archive",
            "app.war",
            "--host",
            "wildfly.internal",
            "--port",
            "0",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("0"));
}

#[test]
fn deploy_rejects_port_above_u16() {
    wfdeploy()
        .args([
            "deploy",
            "--archive",
            "app.war",
            "--host",
            "wildfly.internal",
            "--port",
            "70000",
        ])
        .assert()
        .code(2);
}

#[test]
fn deploy_rejects_lone_username() {
    wfdeploy()
        .args([
            "deploy",
            "--archive",
            "app.war",
            "--host",
            "wildfly.internal",
            "--port",
            "9990",
            "--username",
            "admin",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("supplied together"));
}

// ── Pre-connection failure paths ──────────────────────────────────────────────

#[test]
fn missing_archive_fails_before_connecting() {
    wfdeploy()
        .args([
            "deploy",
            "--archive",
            "no-such-build/app.war",
            "--host",
            "wildfly.internal",
            "--port",
            "9990",
            "--cli-command",
            "/nonexistent/jboss-cli.sh",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("artifact not found"));
}

#[test]
fn missing_archive_with_json_reports_failed_outcome() {
    wfdeploy()
        .args([
            "deploy",
            "--json",
            "--archive",
            "no-such-build/app.war",
            "--host",
            "wildfly.internal",
            "--port",
            "9990",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""succeeded": false"#))
        .stdout(predicate::str::contains("artifact not found"));
}

#[test]
fn unreachable_cli_launcher_is_a_connection_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("application.war");
    std::fs::write(&archive, b"not a real archive").expect("write archive");

    wfdeploy()
        .args([
            "deploy",
            "--archive",
            archive.to_str().expect("utf-8 path"),
            "--host",
            "wildfly.internal",
            "--port",
            "9990",
            "--cli-command",
            "/nonexistent/jboss-cli.sh",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot connect to wildfly.internal:9990"));
}

#[test]
fn suspicious_extension_prints_advisory_but_still_runs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("application.txt");
    std::fs::write(&archive, b"payload").expect("write archive");

    wfdeploy()
        .args([
            "deploy",
            "--archive",
            archive.to_str().expect("utf-8 path"),
            "--host",
            "wildfly.internal",
            "--port",
            "9990",
            "--cli-command",
            "/nonexistent/jboss-cli.sh",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("does not look like a WAR or EAR"))
        .stderr(predicate::str::contains("cannot connect"));
}

#[test]
fn quiet_suppresses_advisories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let archive = dir.path().join("application.txt");
    std::fs::write(&archive, b"payload").expect("write archive");

    wfdeploy()
        .args([
            "deploy",
            "--quiet",
            "--archive",
            archive.to_str().expect("utf-8 path"),
            "--host",
            "wildfly.internal",
            "--port",
            "9990",
            "--cli-command",
            "/nonexistent/jboss-cli.sh",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("WAR or EAR").not());
}
