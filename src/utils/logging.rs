// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/logging.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file initializes log4rs for a campaign: a console appender plus a
// timestamped file appender at the campaign log path, or a user-supplied
// log4rs YAML configuration.
//
// Tree Location:
// - src/utils/logging.rs (logging setup)
// - Depends on: log, log4rs

use crate::Result;
use crate::core::context::RunContext;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l} [{t}] {m}{n}";
const CONSOLE_PATTERN: &str = "{d(%H:%M:%S)} {h({l})} {m}{n}";

/// Build the default configuration for `ctx`
pub fn default_config(ctx: &RunContext, level: LevelFilter) -> Result<Config> {
    std::fs::create_dir_all(ctx.logs_dir())?;

    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .append(true)
        .build(ctx.log_path())?;

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console)))
        .appender(Appender::builder().build("file", Box::new(file)))
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(level),
        )?;

    Ok(config)
}

/// Install the global logger. Can only succeed once per process.
/// Log file written by the default setup; a user log4rs file decides its own
pub fn default_log_path<'a>(ctx: &'a RunContext, config_file: Option<&Path>) -> Option<&'a Path> {
    config_file.is_none().then(|| ctx.log_path())
}

pub fn init_logging(ctx: &RunContext, level: LevelFilter, config_file: Option<&Path>) -> Result<()> {
    match config_file {
        Some(path) => log4rs::init_file(path, Default::default())?,
        None => {
            log4rs::init_config(default_config(ctx, level)?)?;
        }
    }
    Ok(())
}


// Changelog:
// - v1.0.0 (2026-10-16): Initial logging setup.
//   - Console plus per-campaign log file, or a user log4rs YAML file.
//   - Report the default log file only when it is actually written.
