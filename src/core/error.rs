// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/error.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file defines the error taxonomy of the harness. Pair-level failures
// (BenchError) abort one (system, operation) pair only; configuration errors
// (ConfigError) abort the campaign before it starts.
//
// Tree Location:
// - src/core/error.rs (error types)
// - Depends on: thiserror, storage::result_store

use crate::storage::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Binary for system '{system}' not found or not executable at {path:?}")]
    BinaryNotFound { system: String, path: PathBuf },

    /// Recorded for logging only; the iteration is still kept.
    #[error("Invocation {iteration} of {binary:?} failed: {reason}")]
    SubprocessFailure {
        binary: PathBuf,
        iteration: u32,
        reason: String,
    },

    #[error("Failed to persist run: {source}")]
    Persistence {
        #[from]
        source: StoreError,
    },
}

impl BenchError {
    /// Taxonomy name used as a prefix in log lines and campaign reports
    pub const fn kind(&self) -> &'static str {
        match self {
            BenchError::BinaryNotFound { .. } => "BinaryNotFound",
            BenchError::SubprocessFailure { .. } => "SubprocessFailure",
            BenchError::Persistence { .. } => "PersistenceFailure",
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    Parse {
        #[from]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Invalid metric label for system '{system}'")]
    InvalidPattern {
        system: String,
        #[source]
        source: regex::Error,
    },
}

impl ConfigError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            message: message.into(),
        }
    }
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial error types.
//   - Pair-level taxonomy with kind names used in log lines and reports.
//   - Configuration errors for file access, TOML syntax, validation and labels.
