// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/benchmark/campaign.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file implements the campaign controller. It walks the configured
// system x operation matrix sequentially, runs one benchmark per pair, keeps
// going when a pair fails, and finally hands the results directory to the
// configured report generator.
//
// Tree Location:
// - src/benchmark/campaign.rs (campaign orchestration)
// - Depends on: benchmark::runner, storage, tokio (process)

use crate::benchmark::parser::MetricParser;
use crate::benchmark::runner::{BenchmarkRunner, RunParams};
use crate::core::config::CampaignConfig;
use crate::core::context::RunContext;
use crate::core::error::ConfigError;
use crate::core::system_info;
use crate::core::types::Summary;
use crate::storage::{ResultStore, RunId};
use log::{error, info, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::process::Command;

const LOG_TARGET: &str = "zkbench::campaign";

#[derive(Debug, Clone, PartialEq)]
pub enum PairOutcome {
    Completed {
        path: PathBuf,
        summary: Option<Summary>,
    },
    Failed {
        kind: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairReport {
    pub system: String,
    pub operation: String,
    pub outcome: PairOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CampaignReport {
    pub pairs: Vec<PairReport>,
}

impl CampaignReport {
    pub fn completed(&self) -> impl Iterator<Item = &PairReport> {
        self.pairs
            .iter()
            .filter(|p| matches!(p.outcome, PairOutcome::Completed { .. }))
    }

    pub fn failed(&self) -> impl Iterator<Item = &PairReport> {
        self.pairs
            .iter()
            .filter(|p| matches!(p.outcome, PairOutcome::Failed { .. }))
    }

    /// True when at least one pair ran and none completed
    pub fn all_failed(&self) -> bool {
        !self.pairs.is_empty() && self.completed().next().is_none()
    }
}

pub struct CampaignController<'a> {
    ctx: &'a RunContext,
    config: &'a CampaignConfig,
    store: ResultStore,
    parsers: HashMap<String, MetricParser>,
}

impl<'a> CampaignController<'a> {
    /// Prepare a campaign; fails if a system's metric labels cannot be compiled
    pub fn new(
        ctx: &'a RunContext,
        config: &'a CampaignConfig,
        store: ResultStore,
    ) -> Result<Self, ConfigError> {
        let parsers = config
            .systems
            .iter()
            .map(|system| {
                MetricParser::for_system(system).map(|parser| (system.name.clone(), parser))
            })
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;

        Ok(Self {
            ctx,
            config,
            store,
            parsers,
        })
    }

    /// Run every supported (system, operation) pair, one at a time
    pub async fn run_campaign(&self) -> CampaignReport {
        let pairs = self.config.pairs();
        info!(target: LOG_TARGET,
            "🚀 Campaign {} starting: {} systems, {} operations, {} pairs",
            self.ctx.timestamp(),
            self.config.systems.len(),
            self.config.operations.len(),
            pairs.len()
        );

        let system_info = system_info::collect().await;
        info!(target: LOG_TARGET,
            "🖥️  {} ({} cores, {} KB RAM), {}, {}",
            system_info.cpu_model,
            system_info.cpu_cores,
            system_info.memory_total_kb,
            system_info.os,
            system_info.rust_version
        );

        let runner = BenchmarkRunner::new(
            self.ctx,
            &self.config.benchmark,
            &self.store,
            system_info,
        );
        let params = RunParams::from(&self.config.benchmark);

        let mut report = CampaignReport::default();
        for (system, operation) in pairs {
            let outcome = match self.parsers.get(&system.name) {
                Some(parser) => {
                    match runner
                        .run_benchmark(system, &operation.name, parser, params)
                        .await
                    {
                        Ok(run) => PairOutcome::Completed {
                            path: self.store.path_for(&RunId::new(
                                &run.system,
                                &run.operation,
                                self.ctx.timestamp(),
                            )),
                            summary: run.summary,
                        },
                        Err(e) => {
                            error!(target: LOG_TARGET,
                                "[{}] {}/{} skipped: {}",
                                e.kind(),
                                system.name,
                                operation.name,
                                e
                            );
                            PairOutcome::Failed {
                                kind: e.kind(),
                                message: e.to_string(),
                            }
                        }
                    }
                }
                None => {
                    // Only reachable if the config was mutated after construction.
                    error!(target: LOG_TARGET,
                        "No metric parser for system {}, skipping {}",
                        system.name, operation.name
                    );
                    PairOutcome::Failed {
                        kind: "ConfigError",
                        message: format!("no metric parser for system '{}'", system.name),
                    }
                }
            };

            report.pairs.push(PairReport {
                system: system.name.clone(),
                operation: operation.name.clone(),
                outcome,
            });
        }

        info!(target: LOG_TARGET,
            "🏁 Campaign finished: {} completed, {} failed",
            report.completed().count(),
            report.failed().count()
        );

        if report.completed().next().is_some() {
            self.hand_off_report().await;
        }

        report
    }

    /// Invoke the configured report generator on the results directory
    async fn hand_off_report(&self) {
        let Some((program, args)) = self.config.reporting.command.split_first() else {
            info!(target: LOG_TARGET,
                "No report generator configured, results left in {:?}",
                self.store.results_dir()
            );
            return;
        };

        info!(target: LOG_TARGET, "📄 Handing results to report generator {}", program);
        let status = Command::new(program)
            .args(args)
            .arg("--results-dir")
            .arg(self.store.results_dir())
            .arg("--config")
            .arg(self.ctx.config_path())
            .arg("--timestamp")
            .arg(self.ctx.timestamp())
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {
                info!(target: LOG_TARGET, "📄 Report generation finished");
            }
            Ok(status) => {
                warn!(target: LOG_TARGET, "Report generator exited with {}", status);
            }
            Err(e) => {
                warn!(target: LOG_TARGET, "Could not launch report generator {}: {}", program, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(system: &str, outcome: PairOutcome) -> PairReport {
        PairReport {
            system: system.to_string(),
            operation: "ecdsa".to_string(),
            outcome,
        }
    }

    #[test]
    fn test_report_counts() {
        let report = CampaignReport {
            pairs: vec![
                pair(
                    "halo2",
                    PairOutcome::Completed {
                        path: PathBuf::from("halo2_ecdsa.json"),
                        summary: None,
                    },
                ),
                pair(
                    "nexus",
                    PairOutcome::Failed {
                        kind: "BinaryNotFound",
                        message: "missing".to_string(),
                    },
                ),
            ],
        };
        assert_eq!(report.completed().count(), 1);
        assert_eq!(report.failed().count(), 1);
        assert!(!report.all_failed());
    }

    #[test]
    fn test_all_failed_requires_pairs() {
        assert!(!CampaignReport::default().all_failed());

        let report = CampaignReport {
            pairs: vec![pair(
                "nexus",
                PairOutcome::Failed {
                    kind: "BinaryNotFound",
                    message: "missing".to_string(),
                },
            )],
        };
        assert!(report.all_failed());
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Initial campaign controller.
//   - Sequential matrix execution with pair-level failure isolation.
//   - Report generator handoff with results dir, config and timestamp.
