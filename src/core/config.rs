// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/config.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file implements campaign configuration loading from a TOML file: the
// systems under test, the operations they support, run parameters, and the
// optional downstream report command.
//
// Tree Location:
// - src/core/config.rs (campaign configuration)
// - Depends on: serde, toml, clap (ValueEnum), storage (document names)

use crate::core::error::ConfigError;
use crate::storage::RunId;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Process whose resource usage is sampled during a measured iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SampleTarget {
    /// The spawned prover process
    #[default]
    Child,
    /// The harness process itself
    #[serde(rename = "self")]
    #[value(name = "self")]
    Harness,
}

/// Full campaign configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CampaignConfig {
    #[serde(default)]
    pub benchmark: BenchmarkSettings,
    #[serde(default)]
    pub systems: Vec<SystemConfig>,
    #[serde(default)]
    pub operations: Vec<OperationConfig>,
    #[serde(default)]
    pub reporting: ReportingConfig,
}

/// Run parameters shared by every pair of the campaign
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSettings {
    /// Measured iterations per pair
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    #[serde(default = "default_warmup_iterations")]
    pub warmup_iterations: u32,
    #[serde(default = "default_true")]
    pub collect_memory_stats: bool,
    /// Per-invocation timeout in seconds, 0 disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
    #[serde(default)]
    pub sample_target: SampleTarget,
    /// Write every iteration's raw samples next to the run documents
    #[serde(default)]
    pub save_resource_samples: bool,
    /// Formats requested from the downstream report generator
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            warmup_iterations: default_warmup_iterations(),
            collect_memory_stats: default_true(),
            timeout_secs: default_timeout_secs(),
            sample_interval_ms: default_sample_interval_ms(),
            sample_target: SampleTarget::default(),
            save_resource_samples: false,
            output_formats: default_output_formats(),
        }
    }
}

impl BenchmarkSettings {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }
}

fn default_iterations() -> u32 {
    10
}
fn default_warmup_iterations() -> u32 {
    2
}
fn default_true() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    3600
}
fn default_sample_interval_ms() -> u64 {
    100
}
fn default_output_formats() -> Vec<String> {
    vec!["json".to_string(), "html".to_string()]
}

/// A benchmarked system and the executable that drives it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub name: String,
    /// Invoked as `<binary> <operation>`
    pub binary: PathBuf,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub metrics: MetricLabels,
}

/// Label text preceding each metric in a prover's output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricLabels {
    #[serde(default = "default_prove_label")]
    pub prove_time: String,
    #[serde(default = "default_verify_label")]
    pub verify_time: String,
    #[serde(default = "default_size_label")]
    pub proof_size: String,
}

impl Default for MetricLabels {
    fn default() -> Self {
        Self {
            prove_time: default_prove_label(),
            verify_time: default_verify_label(),
            proof_size: default_size_label(),
        }
    }
}

fn default_prove_label() -> String {
    "Proving time:".to_string()
}
fn default_verify_label() -> String {
    "Verification time:".to_string()
}
fn default_size_label() -> String {
    "Proof size:".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Systems implementing this operation; empty means all of them
    #[serde(default)]
    pub systems: Vec<String>,
}

impl OperationConfig {
    pub fn supports(&self, system: &str) -> bool {
        self.systems.is_empty() || self.systems.iter().any(|s| s == system)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportingConfig {
    /// Program and leading arguments of the report generator
    #[serde(default)]
    pub command: Vec<String>,
}

impl CampaignConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_toml(&contents)?;
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: CampaignConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.benchmark.iterations == 0 {
            return Err(ConfigError::invalid("iterations must be at least 1"));
        }
        if self.benchmark.sample_interval_ms == 0 {
            return Err(ConfigError::invalid(
                "sample_interval_ms must be at least 1",
            ));
        }

        let mut names = HashSet::new();
        for system in &self.systems {
            if system.name.trim().is_empty() {
                return Err(ConfigError::invalid("system name cannot be empty"));
            }
            if !names.insert(system.name.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "duplicate system '{}'",
                    system.name
                )));
            }
            let labels = &system.metrics;
            if [&labels.prove_time, &labels.verify_time, &labels.proof_size]
                .iter()
                .any(|l| l.is_empty())
            {
                return Err(ConfigError::invalid(format!(
                    "metric labels of system '{}' cannot be empty",
                    system.name
                )));
            }
        }

        let mut operations = HashSet::new();
        for operation in &self.operations {
            if operation.name.trim().is_empty() {
                return Err(ConfigError::invalid("operation name cannot be empty"));
            }
            if !operations.insert(operation.name.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "duplicate operation '{}'",
                    operation.name
                )));
            }
            if let Some(unknown) = operation.systems.iter().find(|s| !names.contains(s.as_str())) {
                return Err(ConfigError::invalid(format!(
                    "operation '{}' references unknown system '{}'",
                    operation.name, unknown
                )));
            }
        }

        // Documents are named after the sanitized pair, so two pairs must not share one.
        let mut documents: HashMap<String, (&str, &str)> = HashMap::new();
        for (system, operation) in self.pairs() {
            let file_name = RunId::new(&system.name, &operation.name, "").file_name();
            if let Some((other_system, other_operation)) =
                documents.insert(file_name, (system.name.as_str(), operation.name.as_str()))
            {
                return Err(ConfigError::invalid(format!(
                    "{}/{} and {}/{} would write the same result document",
                    other_system, other_operation, system.name, operation.name
                )));
            }
        }

        Ok(())
    }

    /// Keep only the named systems and operations; an empty filter keeps everything
    pub fn retain(&mut self, systems: &[String], operations: &[String]) {
        if !systems.is_empty() {
            self.systems.retain(|s| systems.contains(&s.name));
            // An operation restricted to dropped systems has nothing left to run.
            self.operations.retain_mut(|op| {
                if op.systems.is_empty() {
                    return true;
                }
                op.systems.retain(|s| systems.contains(s));
                !op.systems.is_empty()
            });
        }
        if !operations.is_empty() {
            self.operations.retain(|o| operations.contains(&o.name));
        }
    }

    /// The (system, operation) matrix in execution order
    pub fn pairs(&self) -> Vec<(&SystemConfig, &OperationConfig)> {
        self.systems
            .iter()
            .flat_map(|system| {
                self.operations
                    .iter()
                    .filter(|op| op.supports(&system.name))
                    .map(move |op| (system, op))
            })
            .collect()
    }
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial campaign configuration.
//   - Systems, operations, run parameters and report command from TOML.
//   - Per-system metric labels and configurable sampling target.
//   - Reject pairs whose result documents would share a file name.
