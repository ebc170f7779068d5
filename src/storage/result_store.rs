// ZK Bench Harness - Free and Open Source Software Statement
//
// This project, zkbench, is Free and Open Source Software (FOSS) licensed
// under the MIT License. You are free to use, modify, and distribute this
// software in accordance with the license terms. Contributions are welcome
// via pull requests to the project repository.
//
// File: src/storage/result_store.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// This file implements the result store: one JSON document per
// (system, operation) run, rewritten after every measurement through a
// temporary file that is atomically renamed over the canonical document.
// A crash mid-write leaves the previous complete document in place.
//
// Tree Location:
// - src/storage/result_store.rs (run persistence)
// - Depends on: serde_json, thiserror, tokio (fs)

use crate::core::types::{BenchmarkRun, Measurement, Sample, Summary};
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::{
    fs::{self, OpenOptions},
    io::AsyncWriteExt,
};

static LOG_TARGET: &str = "zkbench::result_store";

const MONITORING_DIR: &str = "monitoring";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Path {path:?} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("Directory {path:?} is read-only")]
    ReadOnlyDirectory { path: PathBuf },

    #[error("Run document does not exist at {path:?}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to serialize run document")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("Failed to deserialize run document {path:?}: {message}")]
    DeserializationError { path: PathBuf, message: String },

    #[error("IO operation failed on {path:?}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Atomic write of {path:?} failed")]
    AtomicWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Measurement iteration {found} appended where {expected} was expected")]
    IterationOutOfOrder { expected: u32, found: u32 },
}

/// Identifies the document of one (system, operation) run in a campaign
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunId {
    pub system: String,
    pub operation: String,
    pub timestamp: String,
}

impl RunId {
    pub fn new(system: &str, operation: &str, timestamp: &str) -> Self {
        Self {
            system: system.to_string(),
            operation: operation.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    /// `<system>_<operation>_<timestamp>.json`
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}_{}.json",
            sanitize(&self.system),
            sanitize(&self.operation),
            self.timestamp
        )
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// A run being recorded. Owned by exactly one runner at a time.
#[derive(Debug)]
pub struct StoredRun {
    id: RunId,
    path: PathBuf,
    run: BenchmarkRun,
}

impl StoredRun {
    pub fn id(&self) -> &RunId {
        &self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn run(&self) -> &BenchmarkRun {
        &self.run
    }
}

#[derive(Serialize)]
struct SampleDocument<'a> {
    system: &'a str,
    operation: &'a str,
    iteration: u32,
    samples: &'a [Sample],
}

#[derive(Debug, Clone)]
pub struct ResultStore {
    results_dir: PathBuf,
}

impl ResultStore {
    /// Open a store rooted at `results_dir`, creating the directory if needed
    pub async fn new(results_dir: PathBuf) -> Result<Self, StoreError> {
        if results_dir.exists() && !results_dir.is_dir() {
            return Err(StoreError::NotADirectory { path: results_dir });
        }

        fs::create_dir_all(&results_dir)
            .await
            .map_err(|e| StoreError::IoError {
                path: results_dir.clone(),
                source: e,
            })?;

        let metadata = fs::metadata(&results_dir)
            .await
            .map_err(|e| StoreError::IoError {
                path: results_dir.clone(),
                source: e,
            })?;
        if metadata.permissions().readonly() {
            return Err(StoreError::ReadOnlyDirectory { path: results_dir });
        }

        Ok(Self { results_dir })
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    pub fn path_for(&self, id: &RunId) -> PathBuf {
        self.results_dir.join(id.file_name())
    }

    /// Persist the initial document of a run and hand back its accumulator
    pub async fn create_run(
        &self,
        timestamp: &str,
        run: BenchmarkRun,
    ) -> Result<StoredRun, StoreError> {
        let id = RunId::new(&run.system, &run.operation, timestamp);
        let path = self.path_for(&id);
        let stored = StoredRun { id, path, run };

        self._write_run(&stored).await?;
        info!(target: LOG_TARGET, "Created run document {:?}", stored.path);
        Ok(stored)
    }

    /// Append one measurement and atomically replace the document.
    ///
    /// On failure the accumulator is rolled back so it keeps matching the
    /// document on disk.
    pub async fn append_measurement(
        &self,
        stored: &mut StoredRun,
        measurement: Measurement,
    ) -> Result<(), StoreError> {
        let expected = stored.run.next_iteration();
        if measurement.iteration != expected {
            return Err(StoreError::IterationOutOfOrder {
                expected,
                found: measurement.iteration,
            });
        }

        stored.run.measurements.push(measurement);
        if let Err(e) = self._write_run(stored).await {
            stored.run.measurements.pop();
            return Err(e);
        }

        debug!(target: LOG_TARGET,
            "Appended iteration {} to {:?}",
            expected, stored.path
        );
        Ok(())
    }

    /// Compute the summary over every stored measurement and write it
    pub async fn finalize(&self, mut stored: StoredRun) -> Result<BenchmarkRun, StoreError> {
        stored.run.summary = Summary::compute(&stored.run.measurements);
        self._write_run(&stored).await?;

        info!(target: LOG_TARGET,
            "Finalized {:?} with {} measurements",
            stored.path,
            stored.run.measurements.len()
        );
        Ok(stored.run)
    }

    pub async fn load(&self, id: &RunId) -> Result<BenchmarkRun, StoreError> {
        let path = self.path_for(id);
        debug!(target: LOG_TARGET, "Loading run document from {:?}", path);

        if !path.exists() {
            return Err(StoreError::FileNotFound { path });
        }

        let contents = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::IoError {
                path: path.clone(),
                source: e,
            })?;

        serde_json::from_str(&contents).map_err(|e| StoreError::DeserializationError {
            path,
            message: e.to_string(),
        })
    }

    /// Persist the raw samples of one iteration under `monitoring/`
    pub async fn save_samples(
        &self,
        id: &RunId,
        iteration: u32,
        samples: &[Sample],
    ) -> Result<PathBuf, StoreError> {
        let dir = self.results_dir.join(MONITORING_DIR);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::IoError {
                path: dir.clone(),
                source: e,
            })?;

        let path = dir.join(format!(
            "monitor_{}_{}_{}_{}.json",
            sanitize(&id.system),
            sanitize(&id.operation),
            iteration,
            id.timestamp
        ));
        let document = SampleDocument {
            system: &id.system,
            operation: &id.operation,
            iteration,
            samples,
        };
        let contents = serde_json::to_vec_pretty(&document)?;
        write_atomic(&path, &contents).await?;

        debug!(target: LOG_TARGET, "Saved {} samples to {:?}", samples.len(), path);
        Ok(path)
    }

    async fn _write_run(&self, stored: &StoredRun) -> Result<(), StoreError> {
        let contents = serde_json::to_vec_pretty(&stored.run)?;
        write_atomic(&stored.path, &contents).await
    }
}

fn temp_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

async fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let temp = stage(path, contents).await?;
    commit(&temp, path).await
}

/// Write `contents` next to `path` without touching `path` itself
async fn stage(path: &Path, contents: &[u8]) -> Result<PathBuf, StoreError> {
    let temp = temp_path(path);
    let atomic_err = |e: std::io::Error| StoreError::AtomicWriteError {
        path: path.to_path_buf(),
        source: e,
    };

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp)
        .await
        .map_err(atomic_err)?;

    temp_file.write_all(contents).await.map_err(atomic_err)?;
    temp_file.flush().await.map_err(atomic_err)?;
    temp_file.sync_all().await.map_err(atomic_err)?;

    Ok(temp)
}

async fn commit(temp: &Path, path: &Path) -> Result<(), StoreError> {
    fs::rename(temp, path)
        .await
        .map_err(|e| StoreError::AtomicWriteError {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{ParsedMetrics, SystemInfo};
    use tempfile::tempdir;

    fn measurement(iteration: u32) -> Measurement {
        Measurement::new(
            iteration,
            ParsedMetrics {
                prove_time: 1.0,
                verify_time: 0.1,
                proof_size: 256.0,
            },
            1024,
            1.2,
        )
    }

    #[test]
    fn test_file_name_sanitizes() {
        let id = RunId::new("aleo snarkvm", "merkle/depth", "20260101_000000");
        assert_eq!(id.file_name(), "aleo-snarkvm_merkle-depth_20260101_000000.json");
    }

    #[tokio::test]
    async fn test_crash_before_rename_keeps_previous_document() {
        let dir = tempdir().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();

        let run = BenchmarkRun::new("halo2", "ecdsa", SystemInfo::default());
        let mut stored = store.create_run("20260101_000000", run).await.unwrap();
        store
            .append_measurement(&mut stored, measurement(1))
            .await
            .unwrap();
        let before = store.load(stored.id()).await.unwrap();

        // Stage the next write but never commit it, as if the process died.
        let mut next = stored.run().clone();
        next.measurements.push(measurement(2));
        let staged = stage(stored.path(), &serde_json::to_vec(&next).unwrap())
            .await
            .unwrap();
        assert!(staged.exists());

        let after = store.load(stored.id()).await.unwrap();
        assert_eq!(after, before);
        assert_eq!(after.measurements.len(), 1);
    }

    #[tokio::test]
    async fn test_truncated_temp_file_is_ignored() {
        let dir = tempdir().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();

        let run = BenchmarkRun::new("miden", "fib", SystemInfo::default());
        let mut stored = store.create_run("20260101_000000", run).await.unwrap();
        stage(stored.path(), b"{\"system\": \"mid").await.unwrap();

        let loaded = store.load(stored.id()).await.unwrap();
        assert!(loaded.measurements.is_empty());

        // The next append overwrites the stale temp file and commits cleanly.
        store
            .append_measurement(&mut stored, measurement(1))
            .await
            .unwrap();
        assert!(!temp_path(stored.path()).exists());
        assert_eq!(store.load(stored.id()).await.unwrap().measurements.len(), 1);
    }

    #[tokio::test]
    async fn test_out_of_order_iteration_rejected() {
        let dir = tempdir().unwrap();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();

        let run = BenchmarkRun::new("nexus", "sha256", SystemInfo::default());
        let mut stored = store.create_run("20260101_000000", run).await.unwrap();

        let result = store.append_measurement(&mut stored, measurement(2)).await;
        assert!(matches!(
            result,
            Err(StoreError::IterationOutOfOrder {
                expected: 1,
                found: 2
            })
        ));
        assert!(stored.run().measurements.is_empty());
    }
}

// Changelog:
// - v1.0.0 (2026-10-16): Initial result store.
//   - Atomic write path (temp file, flush, sync, rename) shared by run
//     documents and optional per-iteration sample files.
//   - Typed in-memory accumulator serialized once per append.
