//! Common utilities for CLI E2E tests.

#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

/// Invoke the CLI with its data directory pointed at `data_dir`.
pub fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_wellspring"))
        .args(args)
        .env("WELLSPRING_DATA_DIR", data_dir)
        .env("WELLSPRING_LOG", "off")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Invoke a CLI command and expect success.
pub fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI command failed with code {code}: {args:?}\n{stderr}");
    stdout
}

/// Invoke a CLI command and expect failure.
pub fn run_cli_failure(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert!(code != 0, "CLI command unexpectedly succeeded: {args:?}");
    (stdout, stderr, code)
}

/// Parse the JSON document that follows any leading status lines.
pub fn parse_json(output: &str) -> serde_json::Value {
    let start = output
        .find(|c| c == '{' || c == '[')
        .expect("no JSON in output");
    serde_json::from_str(&output[start..]).expect("Failed to parse JSON output")
}

/// Create a goal and return its id.
pub fn create_goal(data_dir: &Path, title: &str, extra: &[&str]) -> String {
    let mut args = vec!["goal", "create", title];
    args.extend_from_slice(extra);
    let out = run_cli_success(data_dir, &args);
    parse_json(&out)["id"]
        .as_str()
        .expect("goal id")
        .to_string()
}
