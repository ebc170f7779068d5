// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/runner.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file implements the benchmark execution engine for one
// (system, operation) pair: warmup invocations, then measured invocations
// coordinating the resource sampler, the prover subprocess, the metric parser
// and the result store, then the summary.

use crate::benchmark::parser::MetricParser;
use crate::benchmark::sampler::{ResourceSampler, SamplerReport};
use crate::core::config::{BenchmarkSettings, SampleTarget, SystemConfig};
use crate::core::context::RunContext;
use crate::core::error::BenchError;
use crate::core::types::{BenchmarkRun, Measurement, ParsedMetrics, SystemInfo};
use crate::storage::{ResultStore, RunId};
use crate::utils::format::FormatUtils;
use log::{debug, info, warn};
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use tokio::process::Command;

const LOG_TARGET: &str = "zkbench::runner";

/// Iteration counts and memory collection for one pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParams {
    pub warmup_iterations: u32,
    pub iterations: u32,
    pub collect_memory: bool,
}

impl From<&BenchmarkSettings> for RunParams {
    fn from(settings: &BenchmarkSettings) -> Self {
        Self {
            warmup_iterations: settings.warmup_iterations,
            iterations: settings.iterations,
            collect_memory: settings.collect_memory_stats,
        }
    }
}

/// Main benchmark runner
pub struct BenchmarkRunner<'a> {
    ctx: &'a RunContext,
    settings: &'a BenchmarkSettings,
    store: &'a ResultStore,
    system_info: SystemInfo,
}

impl<'a> BenchmarkRunner<'a> {
    pub fn new(
        ctx: &'a RunContext,
        settings: &'a BenchmarkSettings,
        store: &'a ResultStore,
        system_info: SystemInfo,
    ) -> Self {
        Self {
            ctx,
            settings,
            store,
            system_info,
        }
    }

    /// Benchmark `operation` on `system`.
    ///
    /// Fails only for a missing binary or a persistence failure; failed
    /// invocations are recorded as zeroed measurements.
    pub async fn run_benchmark(
        &self,
        system: &SystemConfig,
        operation: &str,
        parser: &MetricParser,
        params: RunParams,
    ) -> Result<BenchmarkRun, BenchError> {
        if !is_executable(&system.binary) {
            return Err(BenchError::BinaryNotFound {
                system: system.name.clone(),
                path: system.binary.clone(),
            });
        }

        info!(target: LOG_TARGET,
            "🧪 Starting benchmark {}/{}: {} warmup, {} measured, memory stats {}",
            system.name,
            operation,
            params.warmup_iterations,
            params.iterations,
            if params.collect_memory { "on" } else { "off" }
        );

        let run = BenchmarkRun::new(&system.name, operation, self.system_info.clone());
        let mut stored = self.store.create_run(self.ctx.timestamp(), run).await?;

        if params.warmup_iterations > 0 {
            info!(target: LOG_TARGET, "🔥 Warmup phase: {} iterations", params.warmup_iterations);
            for i in 1..=params.warmup_iterations {
                self.warmup(&system.binary, operation, i).await;
            }
            info!(target: LOG_TARGET, "🔥 Warmup phase complete");
        }

        info!(target: LOG_TARGET, "📏 Measurement phase: {} iterations", params.iterations);
        for iteration in 1..=params.iterations {
            let measurement = self
                .measure(system, operation, parser, iteration, params.collect_memory, stored.id())
                .await;

            info!(target: LOG_TARGET,
                "📊 Iteration {}/{}: prove {} | verify {} | proof {} | peak mem {} | wall {}",
                iteration,
                params.iterations,
                FormatUtils::format_seconds(measurement.prove_time),
                FormatUtils::format_seconds(measurement.verify_time),
                FormatUtils::format_bytes(measurement.proof_size),
                FormatUtils::format_memory_kb(measurement.peak_memory_kb),
                FormatUtils::format_seconds(measurement.duration)
            );

            self.store.append_measurement(&mut stored, measurement).await?;
        }

        let run = self.store.finalize(stored).await?;
        if let Some(summary) = &run.summary {
            info!(target: LOG_TARGET,
                "✅ {}/{} done: avg prove {} (min {}, max {}) | avg verify {} | avg proof {} | peak mem {}",
                system.name,
                operation,
                FormatUtils::format_seconds(summary.avg_prove_time),
                FormatUtils::format_seconds(summary.min_prove_time),
                FormatUtils::format_seconds(summary.max_prove_time),
                FormatUtils::format_seconds(summary.avg_verify_time),
                FormatUtils::format_bytes(summary.avg_proof_size),
                FormatUtils::format_memory_kb(summary.peak_memory)
            );
        }

        Ok(run)
    }

    /// Run the binary once, discarding output and status
    async fn warmup(&self, binary: &Path, operation: &str, index: u32) {
        let mut command = Command::new(binary);
        command
            .arg(operation)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let status = match self.settings.timeout() {
            Some(limit) => match tokio::time::timeout(limit, command.status()).await {
                Ok(status) => status,
                Err(_) => {
                    debug!(target: LOG_TARGET, "Warmup {} timed out after {:?}", index, limit);
                    return;
                }
            },
            None => command.status().await,
        };

        match status {
            Ok(status) => debug!(target: LOG_TARGET, "Warmup {} finished: {}", index, status),
            Err(e) => debug!(target: LOG_TARGET, "Warmup {} failed to start: {}", index, e),
        }
    }

    /// One measured invocation. Never fails; problems yield zeroed metrics.
    async fn measure(
        &self,
        system: &SystemConfig,
        operation: &str,
        parser: &MetricParser,
        iteration: u32,
        collect_memory: bool,
        run_id: &RunId,
    ) -> Measurement {
        let start = Instant::now();

        let mut command = Command::new(&system.binary);
        command
            .arg(operation)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                self.log_failure(system, iteration, format!("spawn failed: {}", e));
                return Measurement::new(
                    iteration,
                    ParsedMetrics::default(),
                    0,
                    start.elapsed().as_secs_f64(),
                );
            }
        };

        let mut sampler = if collect_memory {
            let target = match self.settings.sample_target {
                SampleTarget::Child => child.id(),
                SampleTarget::Harness => Some(std::process::id()),
            };
            target.map(|pid| ResourceSampler::start(pid, self.settings.sample_interval()))
        } else {
            None
        };

        let outcome = wait_for_output(child, self.settings.timeout()).await;
        let elapsed = start.elapsed();

        let report = match sampler.as_mut() {
            Some(handle) => handle.stop().await,
            None => SamplerReport::default(),
        };

        let (text, exit_code) = match outcome {
            Ok(output) => {
                if !output.status.success() {
                    self.log_failure(system, iteration, output.status.to_string());
                }
                (combined_output(&output), output.status.code())
            }
            Err(reason) => {
                self.log_failure(system, iteration, reason);
                (String::new(), None)
            }
        };

        let mut measurement = Measurement::new(
            iteration,
            parser.parse(&text),
            report.peak_memory_kb,
            elapsed.as_secs_f64(),
        );
        measurement.exit_code = exit_code;
        measurement.peak_cpu_percent = report.peak_cpu_percent;

        if self.settings.save_resource_samples && !report.samples.is_empty() {
            if let Err(e) = self
                .store
                .save_samples(run_id, iteration, &report.samples)
                .await
            {
                warn!(target: LOG_TARGET,
                    "Could not save samples of {}/{} iteration {}: {}",
                    run_id.system, operation, iteration, e
                );
            }
        }

        measurement
    }

    fn log_failure(&self, system: &SystemConfig, iteration: u32, reason: String) {
        let failure = BenchError::SubprocessFailure {
            binary: system.binary.clone(),
            iteration,
            reason,
        };
        warn!(target: LOG_TARGET, "[{}] {} (iteration kept)", failure.kind(), failure);
    }
}

async fn wait_for_output(
    child: tokio::process::Child,
    timeout: Option<Duration>,
) -> Result<Output, String> {
    match timeout {
        // Dropping the pending future drops the child, which kills it.
        Some(limit) => match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(result) => result.map_err(|e| format!("wait failed: {}", e)),
            Err(_) => Err(format!("timed out after {:?}, killed", limit)),
        },
        None => child
            .wait_with_output()
            .await
            .map_err(|e| format!("wait failed: {}", e)),
    }
}

/// stdout followed by stderr
fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.stderr.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&String::from_utf8_lossy(&output.stderr));
    }
    text
}

/// Whether `path` is a regular file the harness may execute
pub fn is_executable(path: &Path) -> bool {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => {
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                metadata.permissions().mode() & 0o111 != 0
            }
            #[cfg(not(unix))]
            {
                true
            }
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_params_from_settings() {
        let settings = BenchmarkSettings {
            iterations: 7,
            warmup_iterations: 0,
            collect_memory_stats: false,
            ..BenchmarkSettings::default()
        };
        assert_eq!(
            RunParams::from(&settings),
            RunParams {
                warmup_iterations: 0,
                iterations: 7,
                collect_memory: false,
            }
        );
    }

    #[test]
    fn test_missing_path_is_not_executable() {
        assert!(!is_executable(Path::new("/definitely/not/here/prover")));
    }

    #[test]
    fn test_directory_is_not_executable() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_executable(dir.path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prover");
        std::fs::write(&path, "#!/bin/sh\n").unwrap();

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();
        assert!(!is_executable(&path));

        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(is_executable(&path));
    }

    #[cfg(unix)]
    #[test]
    fn test_combined_output_joins_streams() {
        use std::os::unix::process::ExitStatusExt;

        let output = Output {
            status: std::process::ExitStatus::from_raw(0),
            stdout: b"Proving time: 1.0".to_vec(),
            stderr: b"Proof size: 64\n".to_vec(),
        };
        assert_eq!(combined_output(&output), "Proving time: 1.0\nProof size: 64\n");
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Initial runner.
//   - Warmup, measured iterations with concurrent sampling, summary.
//   - Per-invocation timeout; failed invocations kept as zeroed iterations.
