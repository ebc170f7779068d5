// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/mod.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file declares the benchmark module: metric extraction, resource
// sampling, the per-pair runner and the campaign controller.
//
// Tree Location:
// - src/benchmark/mod.rs (benchmark module entry point)
// - Submodules: parser, sampler, runner, campaign

pub mod campaign;
pub mod parser;
pub mod runner;
pub mod sampler;

// Re-export key benchmark types
pub use campaign::{CampaignController, CampaignReport, PairOutcome, PairReport};
pub use parser::MetricParser;
pub use runner::{BenchmarkRunner, RunParams};
pub use sampler::{ResourceSampler, SamplerHandle, SamplerReport};

// Changelog:
// - v1.0.0 (2026-10-16): Benchmark module for external prover binaries.
//   - Subprocess measurement with concurrent resource sampling.
