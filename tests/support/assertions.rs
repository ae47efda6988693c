//! Test assertion helpers.

use serde_json::Value;
use std::process::Output;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}

/// Look up a `$.a.b` style path. Returns `None` if any segment is missing.
pub fn json_path<'a>(json: &'a Value, path: &str) -> Option<&'a Value> {
    path.trim_start_matches("$.")
        .split('.')
        .try_fold(json, |node, key| node.get(key))
}

/// Assert a JSON path exists and equals `expected`.
pub fn assert_json_path(json: &Value, path: &str, expected: Value) {
    assert_eq!(
        json_path(json, path),
        Some(&expected),
        "unexpected value at {} in {}",
        path,
        json
    );
}

/// Assert a JSON path is absent (not merely null).
pub fn assert_no_json_path(json: &Value, path: &str) {
    assert!(
        json_path(json, path).is_none(),
        "expected no {} in {}",
        path,
        json
    );
}
