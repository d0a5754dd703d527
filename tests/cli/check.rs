//! Tests for the check command.

use crate::support::vault::REFUSED_ADDR;
use crate::support::*;

#[test]
fn test_check_env_granted() {
    let vault = Vault::granting();
    let t = Test::with_properties("QA13", &credentials(&vault.uri()));

    let output = t.check_env("QA13", MOUNT, SECRET_PATH);
    assert_exit(&output, 0);
    assert_stdout_contains(&output, "granted");
    assert_output_excludes(&output, SENTINEL);
    assert_output_excludes(&output, SECRET_ID);
}

#[test]
fn test_check_env_full_path_without_mount() {
    let vault = Vault::granting();
    let t = Test::with_properties("QA13", &credentials(&vault.uri()));

    let output = t
        .cmd()
        .args(["check", "--env", "QA13", "--path", "nodalsuite/qa13/kv/data/rabbitmq/admin"])
        .output()
        .unwrap();
    assert_exit(&output, 0);
}

#[test]
fn test_check_missing_secret_id() {
    let vault = Vault::granting();
    let t = Test::with_properties(
        "QA13",
        &[("vault.addr", vault.uri().as_str()), ("vault.role_id", ROLE_ID)],
    );

    let output = t.check_env("QA13", MOUNT, SECRET_PATH);
    assert_exit(&output, 4);
    assert_stderr_contains(&output, "secret_id");
    assert_eq!(vault.request_count(), 0, "store must not be contacted");
}

#[test]
fn test_check_unknown_environment() {
    let vault = Vault::granting();
    let t = Test::with_properties("QA13", &credentials(&vault.uri()));

    let output = t.check_env("QA99", MOUNT, SECRET_PATH);
    assert_exit(&output, 4);
    assert_eq!(vault.request_count(), 0);
}

#[test]
fn test_check_without_configured_source() {
    let t = Test::new();

    let output = t.check_env("QA13", MOUNT, SECRET_PATH);
    assert_exit(&output, 4);
}

#[test]
fn test_check_forbidden_read() {
    let vault = Vault::start();
    vault.accept_login();
    vault.secret(403);
    let t = Test::with_properties("QA13", &credentials(&vault.uri()));

    let output = t.check_env("QA13", MOUNT, SECRET_PATH);
    assert_exit(&output, 2);
    assert_stdout_contains(&output, "forbidden");
    assert_stderr_contains(&output, "permission denied");
}

#[test]
fn test_check_missing_entry() {
    let vault = Vault::start();
    vault.accept_login();
    vault.secret(404);
    let t = Test::with_properties("QA13", &credentials(&vault.uri()));

    let output = t.check_env("QA13", MOUNT, SECRET_PATH);
    assert_exit(&output, 2);
    assert_stdout_contains(&output, "not_found");
}

#[test]
fn test_check_rejected_identity() {
    let vault = Vault::start();
    vault.reject_login();
    let t = Test::new();

    let output = t.check_identity(&vault.uri(), ROLE_ID, "wrong", MOUNT, SECRET_PATH);
    assert_exit(&output, 3);
    assert_output_excludes(&output, "wrong");
}

#[test]
fn test_check_connection_refused() {
    let t = Test::new();

    let output = t.check_identity(REFUSED_ADDR, ROLE_ID, SECRET_ID, MOUNT, SECRET_PATH);
    assert_exit(&output, 5);
    assert_stdout_contains(&output, "network");
}

#[test]
fn test_check_store_fault() {
    let vault = Vault::start();
    vault.accept_login();
    vault.secret(503);
    let t = Test::new();

    let output = t.check_identity(&vault.uri(), ROLE_ID, SECRET_ID, MOUNT, SECRET_PATH);
    assert_exit(&output, 5);
    assert_stdout_contains(&output, "unexpected");
}

#[test]
fn test_check_identity_from_env_vars() {
    let vault = Vault::granting();
    let t = Test::new();

    let output = t
        .cmd()
        .env("VAULT_ADDR", vault.uri())
        .env("VAULT_ROLE_ID", ROLE_ID)
        .env("VAULT_SECRET_ID", SECRET_ID)
        .args(["check", "--mount", MOUNT, "--path", SECRET_PATH])
        .output()
        .unwrap();
    assert_exit(&output, 0);
}

#[test]
fn test_check_with_token_skips_login() {
    let vault = Vault::start();
    vault.secret(200);
    let t = Test::new();

    let output = t
        .cmd()
        .env("VAULT_TOKEN", "hvs.preissued")
        .args([
            "check", "--addr", &vault.uri(), "--mount", MOUNT, "--path", SECRET_PATH,
        ])
        .output()
        .unwrap();
    assert_exit(&output, 0);
    assert_eq!(vault.request_count(), 1);
}

#[test]
fn test_check_json_report() {
    let vault = Vault::start();
    vault.accept_login();
    vault.secret(403);
    let t = Test::with_properties("QA13", &credentials(&vault.uri()));

    let output = t
        .cmd()
        .args([
            "check", "--env", "QA13", "--mount", MOUNT, "--path", SECRET_PATH, "--json",
        ])
        .output()
        .unwrap();
    assert_exit(&output, 2);

    let report = stdout_json(&output);
    assert_eq!(report["verdict"], "denied");
    assert_eq!(report["reason"], "forbidden");
    assert_eq!(report["stage"], "probe");
    assert_eq!(report["coordinate"], "nodalsuite/qa13/kv/rabbitmq/admin");
    assert_eq!(report["environment"], "QA13");
    assert!(report["checked_at"].is_string());
}

#[cfg(feature = "sqlite")]
#[test]
fn test_check_sqlite_source() {
    let vault = Vault::granting();
    let t = Test::new();

    let db = t.dir.path().join("props.db");
    let conn = rusqlite::Connection::open(&db).unwrap();
    conn.execute_batch(
        "CREATE TABLE properties (environment TEXT, name TEXT, value TEXT);",
    )
    .unwrap();
    for (name, value) in credentials(&vault.uri()) {
        conn.execute(
            "INSERT INTO properties (environment, name, value) VALUES ('QA13', ?1, ?2)",
            [name, value],
        )
        .unwrap();
    }
    drop(conn);

    t.write_config("[source]\nkind = \"sqlite\"\npath = \"props.db\"\n");

    let output = t.check_env("QA13", MOUNT, SECRET_PATH);
    assert_exit(&output, 0);
}
