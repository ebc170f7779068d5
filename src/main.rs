// ZK Bench Harness - Free and Open Source Software Statement
//
// File: src/main.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// Command-line entry point: loads the campaign configuration, applies
// overrides, sets up logging and runs one campaign.

use anyhow::{Context, anyhow};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use zkbench::benchmark::{CampaignController, PairOutcome};
use zkbench::core::{CampaignConfig, RunContext, SampleTarget};
use zkbench::storage::ResultStore;
use zkbench::utils::format::FormatUtils;
use zkbench::utils::logging;

/// Command-line arguments for zkbench
#[derive(Parser, Debug)]
#[command(
    name = "zkbench",
    version,
    about = "Benchmark external zero-knowledge proving binaries",
    long_about = "zkbench runs every configured proving system through warmup and measured\n\
                  iterations of each operation it supports, samples its CPU and memory while it\n\
                  runs, extracts the metrics it prints and writes one JSON document per\n\
                  (system, operation) pair.\n\n\
                  Examples:\n\
                    zkbench --config zkbench.toml\n\
                    zkbench --config zkbench.toml --system halo2 --operation ecdsa -n 5\n\
                    zkbench --config zkbench.toml --dry-run"
)]
struct Args {
    /// Campaign configuration file (TOML)
    #[arg(short, long, default_value = "zkbench.toml", value_name = "FILE")]
    config: PathBuf,

    /// Directory receiving the run documents
    #[arg(long, default_value = "results", value_name = "DIR")]
    results_dir: PathBuf,

    /// Directory receiving the campaign log
    #[arg(long, default_value = "logs", value_name = "DIR")]
    logs_dir: PathBuf,

    /// Override the number of measured iterations
    #[arg(short = 'n', long, value_name = "COUNT")]
    iterations: Option<u32>,

    /// Override the number of warmup iterations
    #[arg(long, value_name = "COUNT")]
    warmup: Option<u32>,

    /// Disable memory sampling
    #[arg(long)]
    no_memory: bool,

    /// Process to sample: the prover (child) or the harness itself (self)
    #[arg(long, value_enum)]
    sample_target: Option<SampleTarget>,

    /// Only run these systems (repeatable)
    #[arg(long = "system", value_name = "NAME")]
    systems: Vec<String>,

    /// Only run these operations (repeatable)
    #[arg(long = "operation", value_name = "NAME")]
    operations: Vec<String>,

    /// log4rs YAML configuration replacing the default console + file setup
    #[arg(long, value_name = "FILE")]
    log_config: Option<PathBuf>,

    /// Log level for the default logging setup
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// List the (system, operation) pairs without running them
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut CampaignConfig) {
        if let Some(iterations) = self.iterations {
            config.benchmark.iterations = iterations;
        }
        if let Some(warmup) = self.warmup {
            config.benchmark.warmup_iterations = warmup;
        }
        if self.no_memory {
            config.benchmark.collect_memory_stats = false;
        }
        if let Some(target) = self.sample_target {
            config.benchmark.sample_target = target;
        }
        config.retain(&self.systems, &self.operations);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = CampaignConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    args.apply_overrides(&mut config);
    config.validate().context("validating overrides")?;

    if args.dry_run {
        for (system, operation) in config.pairs() {
            println!("{} {} ({})", system.name, operation.name, system.binary.display());
        }
        return Ok(());
    }

    let ctx = RunContext::new(
        args.results_dir.clone(),
        args.logs_dir.clone(),
        args.config.clone(),
    );
    logging::init_logging(&ctx, args.log_level, args.log_config.as_deref())
        .map_err(|e| anyhow!("setting up logging: {}", e))?;

    let store = ResultStore::new(ctx.results_dir().to_path_buf())
        .await
        .context("opening results directory")?;
    let controller = CampaignController::new(&ctx, &config, store)?;
    let report = controller.run_campaign().await;

    println!();
    println!("Campaign {} ({} pairs)", ctx.timestamp(), report.pairs.len());
    for pair in &report.pairs {
        match &pair.outcome {
            PairOutcome::Completed {
                summary: Some(summary),
                ..
            } => println!(
                "  ✅ {:<16} {:<16} prove {:>12}  verify {:>12}  proof {:>10}  mem {:>10}",
                pair.system,
                pair.operation,
                FormatUtils::format_seconds(summary.avg_prove_time),
                FormatUtils::format_seconds(summary.avg_verify_time),
                FormatUtils::format_bytes(summary.avg_proof_size),
                FormatUtils::format_memory_kb(summary.peak_memory)
            ),
            PairOutcome::Completed { summary: None, .. } => {
                println!("  ✅ {:<16} {:<16} (no measurements)", pair.system, pair.operation)
            }
            PairOutcome::Failed { kind, message } => {
                println!("  ❌ {:<16} {:<16} [{}] {}", pair.system, pair.operation, kind, message)
            }
        }
    }
    println!("Results: {}", ctx.results_dir().display());
    if let Some(log_path) = logging::default_log_path(&ctx, args.log_config.as_deref()) {
        println!("Log: {}", log_path.display());
    }

    if report.all_failed() {
        return Err(anyhow!("every benchmark pair failed"));
    }
    Ok(())
}
