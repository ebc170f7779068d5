// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/sampler.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file implements the resource sampler: a background task that polls
// the CPU and memory usage of one process at a fixed interval until it is
// stopped or the process exits. Polling runs out-of-band so that it does not
// inflate the timing of the measured invocation.
//
// Tree Location:
// - src/benchmark/sampler.rs (resource sampling)
// - Depends on: sysinfo, tokio, chrono

use crate::core::types::Sample;
use chrono::Utc;
use log::{debug, warn};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use sysinfo::{Pid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

const LOG_TARGET: &str = "zkbench::sampler";

/// Default polling interval
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// What a stopped sampler observed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplerReport {
    pub peak_memory_kb: u64,
    pub peak_cpu_percent: f32,
    pub samples: Vec<Sample>,
}

impl SamplerReport {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        let peak_memory_kb = samples.iter().map(|s| s.memory_kb).max().unwrap_or(0);
        let peak_cpu_percent = samples
            .iter()
            .map(|s| s.cpu_percent)
            .fold(0.0f32, f32::max);
        Self {
            peak_memory_kb,
            peak_cpu_percent,
            samples,
        }
    }
}

pub struct ResourceSampler;

impl ResourceSampler {
    /// Start sampling `target_pid` every `interval` on a background task
    pub fn start(target_pid: u32, interval: Duration) -> SamplerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());

        let task = tokio::spawn(poll_loop(
            Pid::from_u32(target_pid),
            interval,
            Arc::clone(&cancelled),
            Arc::clone(&wake),
        ));

        debug!(target: LOG_TARGET,
            "Sampling pid {} every {:?}",
            target_pid, interval
        );

        SamplerHandle {
            target_pid,
            cancelled,
            wake,
            task: Some(task),
            report: None,
        }
    }
}

/// Joinable handle of a running sampler
pub struct SamplerHandle {
    target_pid: u32,
    cancelled: Arc<AtomicBool>,
    wake: Arc<Notify>,
    task: Option<JoinHandle<Vec<Sample>>>,
    report: Option<SamplerReport>,
}

impl SamplerHandle {
    pub fn target_pid(&self) -> u32 {
        self.target_pid
    }

    /// Whether the polling task has ended (stopped or target exited)
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Cancel polling and wait for the task to finish.
    ///
    /// No sample is appended after this returns. Calling it again returns
    /// the same report.
    pub async fn stop(&mut self) -> SamplerReport {
        if let Some(report) = &self.report {
            return report.clone();
        }

        self.cancelled.store(true, Ordering::Release);
        self.wake.notify_one();

        let samples = match self.task.take() {
            Some(task) => match task.await {
                Ok(samples) => samples,
                Err(e) => {
                    warn!(target: LOG_TARGET,
                        "Sampler task for pid {} failed: {}",
                        self.target_pid, e
                    );
                    Vec::new()
                }
            },
            None => Vec::new(),
        };

        let report = SamplerReport::from_samples(samples);
        debug!(target: LOG_TARGET,
            "Sampler for pid {} stopped with {} samples, peak {} KB",
            self.target_pid,
            report.samples.len(),
            report.peak_memory_kb
        );
        self.report = Some(report.clone());
        report
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        self.wake.notify_one();
    }
}

async fn poll_loop(
    pid: Pid,
    interval: Duration,
    cancelled: Arc<AtomicBool>,
    wake: Arc<Notify>,
) -> Vec<Sample> {
    let mut sys = System::new();
    let mut samples = Vec::new();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = wake.notified() => break,
        }
        if cancelled.load(Ordering::Acquire) {
            break;
        }
        match probe(&mut sys, pid) {
            Some(sample) => samples.push(sample),
            None => {
                debug!(target: LOG_TARGET, "Process {} exited, sampling ends", pid);
                break;
            }
        }
    }

    samples
}

/// Read one sample, or `None` once the process is gone
fn probe(sys: &mut System, pid: Pid) -> Option<Sample> {
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[pid]),
        true,
        ProcessRefreshKind::nothing().with_cpu().with_memory(),
    );

    let process = sys.process(pid)?;
    if matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead) {
        return None;
    }

    Some(Sample {
        timestamp: Utc::now(),
        cpu_percent: process.cpu_usage(),
        memory_kb: process.memory() / 1024,
        virtual_memory_kb: process.virtual_memory() / 1024,
    })
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial resource sampler.
//   - Background polling task with joinable stop and idempotent report.
//   - Liveness probe ends sampling as soon as the target exits.
