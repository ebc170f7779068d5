// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/context.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file defines RunContext, the immutable campaign-wide value carrying the
// campaign timestamp and the result, log and configuration paths. It is built
// once at startup and passed by reference to every component.
//
// Tree Location:
// - src/core/context.rs (campaign context)
// - Depends on: chrono

use chrono::Local;
use std::path::{Path, PathBuf};

/// Timestamp format shared by log and result file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
pub struct RunContext {
    timestamp: String,
    results_dir: PathBuf,
    logs_dir: PathBuf,
    log_path: PathBuf,
    config_path: PathBuf,
}

impl RunContext {
    pub fn new(results_dir: PathBuf, logs_dir: PathBuf, config_path: PathBuf) -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self::with_timestamp(timestamp, results_dir, logs_dir, config_path)
    }

    /// Build a context with a fixed timestamp (used by tests and reruns)
    pub fn with_timestamp(
        timestamp: impl Into<String>,
        results_dir: PathBuf,
        logs_dir: PathBuf,
        config_path: PathBuf,
    ) -> Self {
        let timestamp = timestamp.into();
        let log_path = logs_dir.join(format!("benchmark_{}.log", timestamp));
        Self {
            timestamp,
            results_dir,
            logs_dir,
            log_path,
            config_path,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    pub fn logs_dir(&self) -> &Path {
        &self.logs_dir
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_derive_from_timestamp() {
        let ctx = RunContext::with_timestamp(
            "20260101_120000",
            PathBuf::from("/tmp/results"),
            PathBuf::from("/tmp/logs"),
            PathBuf::from("bench.toml"),
        );
        assert_eq!(ctx.timestamp(), "20260101_120000");
        assert_eq!(
            ctx.log_path(),
            Path::new("/tmp/logs/benchmark_20260101_120000.log")
        );
        assert_eq!(ctx.results_dir(), Path::new("/tmp/results"));
        assert_eq!(ctx.config_path(), Path::new("bench.toml"));
    }

    #[test]
    fn test_generated_timestamp_shape() {
        let ctx = RunContext::new(
            PathBuf::from("r"),
            PathBuf::from("l"),
            PathBuf::from("c.toml"),
        );
        let ts = ctx.timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(&ts[8..9], "_");
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Initial run context.
//   - Timestamp captured once and shared by log and result file names.
