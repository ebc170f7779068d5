// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/lib.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file serves as the main library entry point for zkbench, a harness
// that benchmarks external proof-generation binaries. It exports all public
// modules and types that the binary and integration tests use.
//
// Tree Location:
// - src/lib.rs (root library file)
// - Exports modules: core, benchmark, storage, utils

pub mod benchmark;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export commonly used types at the crate root for convenience
pub use crate::benchmark::{BenchmarkRunner, CampaignController, MetricParser, ResourceSampler};
pub use crate::core::{BenchError, CampaignConfig, RunContext};
pub use crate::storage::ResultStore;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

// Changelog:
// - v1.0.0 (2026-10-16): Library root of the benchmark harness.
//   - Purpose: Organizes the project into core (model, config, context,
//     errors), benchmark (parser, sampler, runner, campaign), storage and
//     utils modules.
//   - Note: The common Result type is used where errors from several crates
//     meet, such as logging setup.
