// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/utils/mod.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file is the module declaration for utility functions of the harness.
//
// Tree Location:
// - src/utils/mod.rs (utils module entry point)
// - Submodules: format, logging

pub mod format;
pub mod logging;
