//! Tests for caller errors and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_exit_codes() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "Exit codes");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.cmd().arg("unknown-command").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "vaultprobe");
}

#[test]
fn test_empty_environment_is_caller_error() {
    let t = Test::new();

    let output = t.check_env("  ", MOUNT, SECRET_PATH);
    assert_exit(&output, 1);
    assert_stderr_contains(&output, "environment");
}

#[test]
fn test_invalid_coordinate_is_caller_error() {
    let t = Test::new();

    let output = t.check_env("QA13", MOUNT, "../escape");
    assert_exit(&output, 1);
    assert_stderr_contains(&output, "invalid secret coordinate");
}

#[test]
fn test_missing_inputs() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["check", "--mount", MOUNT, "--path", SECRET_PATH])
        .output()
        .unwrap();
    assert_exit(&output, 1);
    assert_stderr_contains(&output, "--addr");
}

#[test]
fn test_invalid_address() {
    let t = Test::new();

    let output = t.check_identity("ftp://vault", ROLE_ID, SECRET_ID, MOUNT, SECRET_PATH);
    assert_exit(&output, 1);
    assert_stderr_contains(&output, "invalid store address");
}

#[test]
fn test_explicit_config_must_exist() {
    let t = Test::new();

    t.cmd()
        .args(["--config", "nope.toml", "resolve", "--env", "QA13"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config file not found"))
        .stdout(predicate::str::contains("VAULTPROBE_CONFIG"));
}

#[test]
fn test_unknown_config_key_rejected() {
    let t = Test::new();
    t.write_config("[vault]\nretries = 3\n");

    let output = t.resolve("QA13");
    assert_exit(&output, 1);
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vaultprobe"));
}

#[test]
fn test_completions_rejects_unknown_shell() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
