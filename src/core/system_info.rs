// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/core/system_info.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file collects the static environment snapshot stored in every run
// document: CPU model and core count, total memory, OS and kernel versions,
// and the Rust toolchain version. Collection is best-effort and never fails.
//
// Tree Location:
// - src/core/system_info.rs (environment snapshot)
// - Depends on: sysinfo, num_cpus, tokio

use crate::core::types::SystemInfo;
use log::debug;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};
use tokio::process::Command;

const LOG_TARGET: &str = "zkbench::system_info";

/// Collect the environment snapshot for the current machine
pub async fn collect() -> SystemInfo {
    let sys = System::new_with_specifics(
        RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything()),
    );

    let cpu_model = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let info = SystemInfo {
        cpu_model,
        cpu_cores: num_cpus::get(),
        memory_total_kb: sys.total_memory() / 1024,
        os: System::long_os_version().unwrap_or_else(|| std::env::consts::OS.to_string()),
        kernel: System::kernel_version(),
        rust_version: rust_version().await,
    };

    debug!(target: LOG_TARGET, "Collected system info: {:?}", info);
    info
}

async fn rust_version() -> String {
    match Command::new("rustc").arg("--version").output().await {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        Ok(output) => {
            debug!(target: LOG_TARGET, "rustc --version exited with {}", output.status);
            "unknown".to_string()
        }
        Err(e) => {
            debug!(target: LOG_TARGET, "rustc not available: {}", e);
            "unknown".to_string()
        }
    }
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial environment snapshot.
//   - CPU, memory and OS via sysinfo; rustc version best-effort.
