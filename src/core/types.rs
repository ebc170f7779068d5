// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/types.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file defines the data model of the benchmark harness: the persisted run
// document (BenchmarkRun, Measurement, Summary, SystemInfo), the ephemeral
// resource Sample, and the metrics extracted from a prover's output.
//
// Tree Location:
// - src/core/types.rs (core data structures)
// - Depends on: serde, chrono

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Static snapshot of the machine a campaign runs on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// CPU brand string (e.g., "AMD Ryzen 9 7950X 16-Core Processor")
    pub cpu_model: String,
    /// Logical CPU count
    pub cpu_cores: usize,
    /// Total physical memory in KB
    pub memory_total_kb: u64,
    /// Long OS version (e.g., "Linux 24.04 Ubuntu")
    pub os: String,
    /// Kernel version if known
    pub kernel: Option<String>,
    /// Output of `rustc --version`, or "unknown"
    pub rust_version: String,
}

impl Default for SystemInfo {
    fn default() -> Self {
        Self {
            cpu_model: "unknown".to_string(),
            cpu_cores: 0,
            memory_total_kb: 0,
            os: "unknown".to_string(),
            kernel: None,
            rust_version: "unknown".to_string(),
        }
    }
}

/// Metrics a prover reports on its own output
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParsedMetrics {
    /// Seconds spent proving
    pub prove_time: f64,
    /// Seconds spent verifying
    pub verify_time: f64,
    /// Proof size in bytes
    pub proof_size: f64,
}

/// One measured iteration of a (system, operation) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// 1-based, contiguous within a run
    pub iteration: u32,
    pub prove_time: f64,
    pub verify_time: f64,
    pub proof_size: f64,
    pub peak_memory_kb: u64,
    /// Wall-clock seconds around the invocation
    pub duration: f64,
    /// Exit code of the prover; absent when it was killed or never started
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    #[serde(default)]
    pub peak_cpu_percent: f32,
}

impl Measurement {
    pub fn new(
        iteration: u32,
        metrics: ParsedMetrics,
        peak_memory_kb: u64,
        duration: f64,
    ) -> Self {
        Self {
            iteration,
            prove_time: metrics.prove_time,
            verify_time: metrics.verify_time,
            proof_size: metrics.proof_size,
            peak_memory_kb,
            duration,
            exit_code: None,
            peak_cpu_percent: 0.0,
        }
    }
}

/// Aggregate over every Measurement of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub avg_prove_time: f64,
    pub avg_verify_time: f64,
    pub avg_proof_size: f64,
    /// Maximum `peak_memory_kb` across iterations
    pub peak_memory: u64,
    pub min_prove_time: f64,
    pub max_prove_time: f64,
}

impl Summary {
    /// Compute the summary of a series of measurements.
    ///
    /// Returns `None` for an empty series. The result depends only on the
    /// measurements, so recomputing it is always safe.
    pub fn compute(measurements: &[Measurement]) -> Option<Self> {
        if measurements.is_empty() {
            return None;
        }

        let count = measurements.len() as f64;
        let mut prove_sum = 0.0;
        let mut verify_sum = 0.0;
        let mut size_sum = 0.0;
        let mut peak_memory = 0u64;
        let mut min_prove_time = f64::INFINITY;
        let mut max_prove_time = f64::NEG_INFINITY;

        for m in measurements {
            prove_sum += m.prove_time;
            verify_sum += m.verify_time;
            size_sum += m.proof_size;
            peak_memory = peak_memory.max(m.peak_memory_kb);
            min_prove_time = min_prove_time.min(m.prove_time);
            max_prove_time = max_prove_time.max(m.prove_time);
        }

        Some(Self {
            avg_prove_time: prove_sum / count,
            avg_verify_time: verify_sum / count,
            avg_proof_size: size_sum / count,
            peak_memory,
            min_prove_time,
            max_prove_time,
        })
    }
}

/// The persisted record of one (system, operation) execution series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    pub system: String,
    pub operation: String,
    /// RFC 3339 start time
    pub timestamp: String,
    pub system_info: SystemInfo,
    pub measurements: Vec<Measurement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

impl BenchmarkRun {
    pub fn new(system: &str, operation: &str, system_info: SystemInfo) -> Self {
        Self {
            system: system.to_string(),
            operation: operation.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            system_info,
            measurements: Vec::new(),
            summary: None,
        }
    }

    /// Index the next appended measurement must carry
    pub fn next_iteration(&self) -> u32 {
        self.measurements.len() as u32 + 1
    }
}

/// One resource-usage reading of a sampled process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub cpu_percent: f32,
    /// Resident set size in KB
    pub memory_kb: u64,
    pub virtual_memory_kb: u64,
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial data model.
//   - Run document layout consumed by the downstream report generator.
//   - Summary computed as a pure aggregate over measurements.
