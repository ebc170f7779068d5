// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/parser.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file implements the metric parser, a label-anchored extractor that
// pulls proving time, verification time and proof size out of a prover's
// free-form output. Labels are configured per system.
//
// Tree Location:
// - src/benchmark/parser.rs (metric extraction)
// - Depends on: regex

use crate::core::config::{MetricLabels, SystemConfig};
use crate::core::error::ConfigError;
use crate::core::types::ParsedMetrics;
use regex::Regex;

/// Non-negative decimal, optionally fractional
const NUMBER: &str = r"(\d+(?:\.\d+)?|\.\d+)";

#[derive(Debug, Clone)]
pub struct MetricParser {
    prove_time: Regex,
    verify_time: Regex,
    proof_size: Regex,
}

impl MetricParser {
    pub fn new(labels: &MetricLabels) -> Result<Self, regex::Error> {
        Ok(Self {
            prove_time: label_regex(&labels.prove_time)?,
            verify_time: label_regex(&labels.verify_time)?,
            proof_size: label_regex(&labels.proof_size)?,
        })
    }

    pub fn for_system(system: &SystemConfig) -> Result<Self, ConfigError> {
        Self::new(&system.metrics).map_err(|e| ConfigError::InvalidPattern {
            system: system.name.clone(),
            source: e,
        })
    }

    /// Extract the three metrics from `raw`.
    ///
    /// Never fails: a missing or malformed value yields 0. Only the first
    /// occurrence of a label is read, even when its value is malformed.
    pub fn parse(&self, raw: &str) -> ParsedMetrics {
        ParsedMetrics {
            prove_time: first_value(&self.prove_time, raw),
            verify_time: first_value(&self.verify_time, raw),
            proof_size: first_value(&self.proof_size, raw),
        }
    }
}

/// Matches every occurrence of the label; the number after it is optional.
fn label_regex(label: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"{}[ \t]*(?:{})?",
        regex::escape(label.trim_end()),
        NUMBER
    ))
}

fn first_value(pattern: &Regex, raw: &str) -> f64 {
    pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial metric parser.
//   - Label-anchored extraction with per-system labels, default-to-zero.
//   - Anchor to the first label occurrence even when its value is malformed.
