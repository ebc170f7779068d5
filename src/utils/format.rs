// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/format.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file provides utility functions for formatting benchmark figures in
// log lines and the end-of-campaign table: durations, memory and byte sizes.
//
// Tree Location:
// - src/utils/format.rs (formatting utilities)
// - Depends on: std

/// Utility functions for formatting benchmark figures
pub struct FormatUtils;

impl FormatUtils {
    /// Format seconds in appropriate units (µs, ms, s, min)
    pub fn format_seconds(seconds: f64) -> String {
        if seconds >= 60.0 {
            format!("{:.2} min", seconds / 60.0)
        } else if seconds >= 1.0 {
            format!("{:.3} s", seconds)
        } else if seconds >= 0.001 {
            format!("{:.2} ms", seconds * 1_000.0)
        } else {
            format!("{:.0} µs", seconds * 1_000_000.0)
        }
    }

    /// Format a KB figure (KB, MB, GB)
    pub fn format_memory_kb(kb: u64) -> String {
        if kb >= 1_048_576 {
            format!("{:.2} GB", kb as f64 / 1_048_576.0)
        } else if kb >= 1_024 {
            format!("{:.1} MB", kb as f64 / 1_024.0)
        } else {
            format!("{} KB", kb)
        }
    }

    /// Format a byte count (B, KB, MB)
    pub fn format_bytes(bytes: f64) -> String {
        if bytes >= 1_048_576.0 {
            format!("{:.2} MB", bytes / 1_048_576.0)
        } else if bytes >= 1_024.0 {
            format!("{:.1} KB", bytes / 1_024.0)
        } else {
            format!("{:.0} B", bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(FormatUtils::format_seconds(0.0), "0 µs");
        assert_eq!(FormatUtils::format_seconds(0.00045), "450 µs");
        assert_eq!(FormatUtils::format_seconds(0.45), "450.00 ms");
        assert_eq!(FormatUtils::format_seconds(1.23), "1.230 s");
        assert_eq!(FormatUtils::format_seconds(90.0), "1.50 min");
    }

    #[test]
    fn test_format_memory_kb() {
        assert_eq!(FormatUtils::format_memory_kb(0), "0 KB");
        assert_eq!(FormatUtils::format_memory_kb(1_536), "1.5 MB");
        assert_eq!(FormatUtils::format_memory_kb(3_145_728), "3.00 GB");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(FormatUtils::format_bytes(512.0), "512 B");
        assert_eq!(FormatUtils::format_bytes(2_048.0), "2.0 KB");
        assert_eq!(FormatUtils::format_bytes(5_242_880.0), "5.00 MB");
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Adapted from the hashrate formatter.
//   - Formats seconds, memory in KB and proof sizes in bytes.
