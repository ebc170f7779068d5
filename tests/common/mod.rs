// ZK Bench Harness - Free and Open Source Software Statement
//
// File: tests/common/mod.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// Shared helpers for the integration tests: stub prover scripts, settings
// and run contexts rooted in a temporary directory.

#![allow(dead_code)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use zkbench::core::{BenchmarkSettings, MetricLabels, RunContext, SystemConfig};

pub const TIMESTAMP: &str = "20260101_120000";

/// Prints the three default metric labels with fixed values
pub const DEMO_PROVER: &str = r#"echo "Proving time: 1.23"
echo "Verification time: 0.45"
echo "Proof size: 512"
"#;

/// Write an executable shell script named `name` with `body` into `dir`.
///
/// Every invocation also appends its first argument to `<name>.calls`.
pub fn write_prover(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let calls = dir.join(format!("{}.calls", name));
    let script = format!(
        "#!/bin/sh\necho \"$1\" >> \"{}\"\n{}",
        calls.display(),
        body
    );
    std::fs::write(&path, script).expect("Failed to write stub prover");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make stub prover executable");
    path
}

/// Number of times the stub prover `name` in `dir` was invoked
pub fn call_count(dir: &Path, name: &str) -> usize {
    std::fs::read_to_string(dir.join(format!("{}.calls", name)))
        .map(|s| s.lines().count())
        .unwrap_or(0)
}

pub fn system(name: &str, binary: PathBuf) -> SystemConfig {
    SystemConfig {
        name: name.to_string(),
        binary,
        description: String::new(),
        metrics: MetricLabels::default(),
    }
}

pub fn settings(iterations: u32, warmup_iterations: u32) -> BenchmarkSettings {
    BenchmarkSettings {
        iterations,
        warmup_iterations,
        sample_interval_ms: 20,
        ..BenchmarkSettings::default()
    }
}

pub fn context(root: &Path) -> RunContext {
    RunContext::with_timestamp(
        TIMESTAMP,
        root.join("results"),
        root.join("logs"),
        root.join("zkbench.toml"),
    )
}
