// ZK Bench Harness - Free and Open Source Software Statement
//
// File: tests/result_store_test.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// Tests of the result store through its public API: document creation,
// incremental appends, finalization, reloading and error handling.

#[cfg(test)]
mod tests {
    use tempfile::{TempDir, tempdir};
    use zkbench::core::{BenchmarkRun, Measurement, ParsedMetrics, SystemInfo};
    use zkbench::storage::{ResultStore, RunId, StoreError};

    const TIMESTAMP: &str = "20260101_120000";

    fn create_temp_dir() -> TempDir {
        tempdir().expect("Failed to create temporary directory")
    }

    fn measurement(iteration: u32, prove_time: f64) -> Measurement {
        Measurement::new(
            iteration,
            ParsedMetrics {
                prove_time,
                verify_time: 0.5,
                proof_size: 1024.0,
            },
            2048 * iteration as u64,
            prove_time + 0.6,
        )
    }

    fn read_json(path: &std::path::Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_new_creates_directory() {
        let dir = create_temp_dir();
        let results = dir.path().join("nested").join("results");

        let store = ResultStore::new(results.clone()).await.unwrap();
        assert!(results.is_dir());
        assert_eq!(store.results_dir(), results.as_path());
    }

    #[tokio::test]
    async fn test_new_rejects_file_path() {
        let dir = create_temp_dir();
        let file = dir.path().join("results");
        std::fs::write(&file, "not a directory").unwrap();

        let result = ResultStore::new(file).await;
        assert!(matches!(result, Err(StoreError::NotADirectory { .. })));
    }

    #[tokio::test]
    async fn test_document_grows_with_each_iteration() {
        let dir = create_temp_dir();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();
        let run = BenchmarkRun::new("halo2", "ecdsa", SystemInfo::default());

        let mut stored = store.create_run(TIMESTAMP, run).await.unwrap();
        let path = stored.path().to_path_buf();
        assert_eq!(path, dir.path().join("halo2_ecdsa_20260101_120000.json"));

        let initial = read_json(&path);
        assert_eq!(initial["system"], "halo2");
        assert_eq!(initial["operation"], "ecdsa");
        assert_eq!(initial["measurements"].as_array().unwrap().len(), 0);
        assert!(initial.get("summary").is_none());

        for i in 1..=3 {
            store
                .append_measurement(&mut stored, measurement(i, i as f64))
                .await
                .unwrap();
            let on_disk = read_json(&path);
            assert_eq!(on_disk["measurements"].as_array().unwrap().len(), i as usize);
            assert_eq!(on_disk["measurements"][i as usize - 1]["iteration"], i);
        }

        let run = store.finalize(stored).await.unwrap();
        let summary = run.summary.clone().unwrap();
        assert!((summary.avg_prove_time - 2.0).abs() < 1e-9);
        assert_eq!(summary.min_prove_time, 1.0);
        assert_eq!(summary.max_prove_time, 3.0);
        assert_eq!(summary.peak_memory, 6144);

        let loaded = store
            .load(&RunId::new("halo2", "ecdsa", TIMESTAMP))
            .await
            .unwrap();
        assert_eq!(loaded, run);
        assert!(!dir.path().join("halo2_ecdsa_20260101_120000.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_finalize_without_measurements() {
        let dir = create_temp_dir();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();
        let run = BenchmarkRun::new("miden", "sha256", SystemInfo::default());

        let stored = store.create_run(TIMESTAMP, run).await.unwrap();
        let run = store.finalize(stored).await.unwrap();
        assert!(run.summary.is_none());
    }

    #[tokio::test]
    async fn test_out_of_order_iteration_leaves_document_untouched() {
        let dir = create_temp_dir();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();
        let run = BenchmarkRun::new("halo2", "ecdsa", SystemInfo::default());

        let mut stored = store.create_run(TIMESTAMP, run).await.unwrap();
        store
            .append_measurement(&mut stored, measurement(1, 1.0))
            .await
            .unwrap();
        let before = std::fs::read_to_string(stored.path()).unwrap();

        let result = store.append_measurement(&mut stored, measurement(3, 1.0)).await;
        assert!(matches!(
            result,
            Err(StoreError::IterationOutOfOrder {
                expected: 2,
                found: 3
            })
        ));
        assert_eq!(std::fs::read_to_string(stored.path()).unwrap(), before);
        assert_eq!(stored.run().measurements.len(), 1);
    }

    #[tokio::test]
    async fn test_load_missing_document() {
        let dir = create_temp_dir();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();

        let result = store.load(&RunId::new("nexus", "ecdsa", TIMESTAMP)).await;
        assert!(matches!(result, Err(StoreError::FileNotFound { .. })));
    }

    #[tokio::test]
    async fn test_load_corrupted_document() {
        let dir = create_temp_dir();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();
        let id = RunId::new("nexus", "ecdsa", TIMESTAMP);
        std::fs::write(store.path_for(&id), "{ \"system\": \"nexus\", ").unwrap();

        let result = store.load(&id).await;
        assert!(matches!(result, Err(StoreError::DeserializationError { .. })));
    }

    #[tokio::test]
    async fn test_runs_of_different_pairs_do_not_collide() {
        let dir = create_temp_dir();
        let store = ResultStore::new(dir.path().to_path_buf()).await.unwrap();

        let a = store
            .create_run(TIMESTAMP, BenchmarkRun::new("halo2", "ecdsa", SystemInfo::default()))
            .await
            .unwrap();
        let b = store
            .create_run(TIMESTAMP, BenchmarkRun::new("halo2", "sha256", SystemInfo::default()))
            .await
            .unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().exists() && b.path().exists());
    }
}
