// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/storage/mod.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file declares the storage module, which owns the on-disk run
// documents of a campaign.
//
// Tree Location:
// - src/storage/mod.rs (storage module entry point)
// - Submodules: result_store

pub mod result_store;

pub use result_store::{ResultStore, RunId, StoreError, StoredRun};
