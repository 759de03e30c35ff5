//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

/// Get a command for the persona-router binary
fn router_cmd() -> Command {
    let mut cmd = Command::cargo_bin("persona-router").unwrap();
    cmd.env_remove("PERSONA_ROUTER_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    router_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Persona Router"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("enhance"))
        .stdout(predicate::str::contains("hook"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    router_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona-router"))
        .stdout(predicate::str::contains("Git Branch"))
        .stdout(predicate::str::contains("Target"));
}

#[test]
fn test_version_short() {
    router_cmd()
        .args(["version", "--short"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("persona-router "));
}

// ─────────────────────────────────────────────────────────────────
// Operation Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_enhance_forced_persona() {
    router_cmd()
        .args(["enhance", "write a poem", "--persona", "security-expert"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/security\n\n"))
        .stdout(predicate::str::contains("You are a Security Expert"))
        .stdout(predicate::str::contains("**Task**: write a poem"));
}

#[test]
fn test_enhance_pass_through() {
    router_cmd()
        .args(["enhance", "what is the weather"])
        .assert()
        .success()
        .stdout("what is the weather\n");
}

#[test]
fn test_enhance_with_context() {
    router_cmd()
        .args(["enhance", "Set up a Docker pipeline", "--context", "on AWS"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/devops\n\n"))
        .stdout(predicate::str::contains("**Additional Context**: on AWS\n\n"));
}

#[test]
fn test_suggest_workflow() {
    router_cmd()
        .args(["suggest", "Please review and fix this function"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Code review followed by fixes"))
        .stdout(predicate::str::contains(
            "Code Reviewer (/review) → Senior Developer (/dev)",
        ));
}

#[test]
fn test_suggest_nothing() {
    router_cmd()
        .args(["suggest", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No specific persona recommended"));
}

#[test]
fn test_list_personas() {
    let output = router_cmd().arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().filter(|l| l.starts_with("• ")).count(), 10);
    for command in [
        "/dev", "/review", "/architect", "/devops", "/analyze", "/business", "/write", "/doc",
        "/solve", "/security",
    ] {
        assert!(stdout.contains(&format!("({})", command)), "missing {}", command);
    }
}

#[test]
fn test_workflow_command() {
    router_cmd()
        .args(["workflow", "analyze the logs then implement a fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Is Workflow**: true"))
        .stdout(predicate::str::contains("Data Analyst → Senior Developer"));
}

#[test]
fn test_workflow_single_task() {
    router_cmd()
        .args(["workflow", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("**Type**: Single task"));
}

// ─────────────────────────────────────────────────────────────────
// Generic Call Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_call_enhance_prompt() {
    router_cmd()
        .args([
            "call",
            "enhance_prompt",
            "--args",
            r#"{"prompt": "document this", "force_persona": "tech-writer"}"#,
        ])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/doc\n\n"));
}

#[test]
fn test_call_unknown_tool() {
    router_cmd()
        .args(["call", "delete_everything"])
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("Unknown tool: delete_everything"));
}

#[test]
fn test_call_malformed_arguments() {
    router_cmd()
        .args(["call", "suggest_persona", "--args", "{not json"])
        .assert()
        .failure()
        .code(40);
}

#[test]
fn test_call_missing_prompt() {
    router_cmd()
        .args(["call", "detect_workflow", "--args", "{}"])
        .assert()
        .failure()
        .code(40)
        .stderr(predicate::str::contains("detect_workflow"));
}

// ─────────────────────────────────────────────────────────────────
// Hook Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_hook_json_input() {
    router_cmd()
        .arg("hook")
        .write_stdin(r#"{"prompt": "Set up a Docker pipeline"}"#)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("/devops\n\n"))
        .stdout(predicate::str::ends_with("**Task**: Set up a Docker pipeline\n"));
}

#[test]
fn test_hook_skips_slash_commands() {
    router_cmd()
        .arg("hook")
        .write_stdin("/compact all the code")
        .assert()
        .success()
        .stdout("/compact all the code\n");
}

#[test]
fn test_hook_survives_bad_config() {
    router_cmd()
        .args(["hook", "--config", "/nonexistent/config.toml"])
        .write_stdin("short")
        .assert()
        .success()
        .stdout("short\n");
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_default() {
    router_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[server]"))
        .stdout(predicate::str::contains("[routing]"))
        .stdout(predicate::str::contains("[hook]"))
        .stdout(predicate::str::contains("[logging]"));
}

#[test]
fn test_config_validate_default() {
    router_cmd()
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_config_validate_nonexistent_file() {
    router_cmd()
        .args(["config", "validate", "--config", "/nonexistent/path/config.toml"])
        .assert()
        .failure()
        .code(10)
        .stderr(predicate::str::contains("not found"));
}

// ─────────────────────────────────────────────────────────────────
// Error Handling Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    router_cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_subcommand() {
    router_cmd().assert().failure();
}

#[test]
fn test_missing_config_fails_operations() {
    router_cmd()
        .args(["list", "--config", "/nonexistent/config.toml"])
        .assert()
        .failure()
        .code(10);
}
