//! Assertions over captured process output.

use std::process::Output;

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn dump(output: &Output) -> String {
    format!("stdout: {}\nstderr: {}", stdout(output), stderr(output))
}

/// Assert the process exited with `code`.
pub fn assert_exit(output: &Output, code: i32) {
    assert_eq!(output.status.code(), Some(code), "exit code\n{}", dump(output));
}

pub fn assert_success(output: &Output) {
    assert_exit(output, 0);
}

pub fn assert_stdout_contains(output: &Output, needle: &str) {
    assert!(stdout(output).contains(needle), "stdout lacks '{}'\n{}", needle, dump(output));
}

pub fn assert_stderr_contains(output: &Output, needle: &str) {
    assert!(stderr(output).contains(needle), "stderr lacks '{}'\n{}", needle, dump(output));
}

/// Assert `needle` appears on neither stream.
pub fn assert_output_excludes(output: &Output, needle: &str) {
    let leaked = stdout(output).contains(needle) || stderr(output).contains(needle);
    assert!(!leaked, "output leaked '{}'\n{}", needle, dump(output));
}

/// Parse stdout as one JSON document.
pub fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({})\n{}", e, dump(output)))
}
