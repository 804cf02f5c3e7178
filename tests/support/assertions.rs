//! Test assertion helpers.

use std::process::Output;

use scopespread::core::domain::VariableCollection;

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

/// Assert stdout contains a string.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
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

/// Assert no two secrets in the collection share a name.
pub fn assert_secret_names_unique(collection: &VariableCollection) {
    let mut names: Vec<&str> = collection
        .variables
        .iter()
        .filter(|v| v.is_secret())
        .map(|v| v.name.as_str())
        .collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(
        names.len(),
        total,
        "duplicate secret names in {}",
        collection.owner_id
    );
}

/// Assert every secret in the collection is unscoped.
pub fn assert_secrets_unscoped(collection: &VariableCollection) {
    for variable in collection.variables.iter().filter(|v| v.is_secret()) {
        assert!(
            variable.scope.is_empty(),
            "secret '{}' in {} is still scoped",
            variable.name,
            collection.owner_id
        );
    }
}

/// Assert no variable name has stray whitespace or a trailing underscore.
pub fn assert_names_tidy(collection: &VariableCollection) {
    for variable in &collection.variables {
        assert_eq!(
            variable.name.trim(),
            variable.name,
            "untidy name '{}'",
            variable.name
        );
        assert!(
            !variable.name.ends_with('_'),
            "name '{}' ends in an underscore",
            variable.name
        );
    }
}
