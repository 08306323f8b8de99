//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// The a–n reference graph as a graph document.
pub fn reference_document() -> Value {
    let nodes: Vec<Value> = [
        "a", "b", "c", "d", "e", "f", "g", "h", "j", "k", "l", "m", "n",
    ]
    .iter()
    .map(|id| json!({"id": id, "name": id.to_uppercase()}))
    .collect();

    let edges: Vec<Value> = [
        ("a", "b", 0.5),
        ("b", "c", 10.0),
        ("b", "e", 42.0),
        ("c", "d", 5.0),
        ("d", "e", 0.8),
        ("e", "a", 0.42),
        ("e", "f", 1.0),
        ("e", "h", 0.53),
        ("g", "g", 0.5),
        ("h", "j", 0.5),
        ("j", "h", 0.5),
        ("a", "k", 6.0),
        ("k", "l", 7.0),
        ("l", "m", 8.0),
        ("m", "n", 9.0),
    ]
    .iter()
    .enumerate()
    .map(|(i, (from, to, cost))| json!({"id": format!("e{}", i + 1), "from": from, "to": to, "cost": cost}))
    .collect();

    json!({"id": "g0", "name": "Reference", "nodes": nodes, "edges": edges})
}

/// Write `value` as JSON into `dir/name` and return the path.
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap())
        .expect("Failed to write JSON fixture");
    path
}

/// Path to the compiled waygraph binary.
pub fn waygraph_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_waygraph"))
}

/// Run the waygraph binary in the specified directory
pub fn run_waygraph_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(waygraph_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute waygraph binary")
}

/// Run the waygraph binary with `stdin` piped in
pub fn run_waygraph_with_stdin(dir: &Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(waygraph_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn waygraph binary");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    child.wait_with_output().expect("Failed to wait for waygraph")
}

/// Parse stdout as JSON, with stderr in the panic message on failure.
pub fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}
