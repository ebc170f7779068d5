// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/mod.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file is the module declaration for the core of the benchmark harness.
// It declares the data model, configuration, run context, error and
// environment snapshot submodules and re-exports their key types.

pub mod config;
pub mod context;
pub mod error;
pub mod system_info;
pub mod types;

// Re-export the most commonly used items
pub use config::{
    BenchmarkSettings, CampaignConfig, MetricLabels, OperationConfig, ReportingConfig,
    SampleTarget, SystemConfig,
};
pub use context::RunContext;
pub use error::{BenchError, ConfigError};
pub use types::{BenchmarkRun, Measurement, ParsedMetrics, Sample, Summary, SystemInfo};
