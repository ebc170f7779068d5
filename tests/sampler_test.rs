// ZK Bench Harness - Free and Open Source Software Statement
//
// File: tests/sampler_test.rs
// Version: 1.0.0
// Developer: zkbench contributors
//
// Tests of the resource sampler against real child processes.

#![cfg(unix)]

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};
    use tokio::process::Command;
    use zkbench::benchmark::ResourceSampler;

    #[tokio::test]
    async fn test_sampler_follows_child_lifetime() {
        let interval = Duration::from_millis(100);
        let mut child = Command::new("sleep")
            .arg("0.35")
            .spawn()
            .expect("Failed to spawn sleep");
        let pid = child.id().expect("child pid");

        let mut handle = ResourceSampler::start(pid, interval);
        let reaper = tokio::spawn(async move { child.wait().await });
        reaper.await.unwrap().unwrap();

        // Once the child is gone the sampler ends on its next tick.
        let exited = Instant::now();
        let deadline = interval + Duration::from_millis(20);
        while !handle.is_finished() && exited.elapsed() < deadline {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert!(
            handle.is_finished(),
            "sampler still polling {:?} after exit",
            exited.elapsed()
        );

        let report = handle.stop().await;
        assert!(
            (2..=4).contains(&report.samples.len()),
            "unexpected sample count {}",
            report.samples.len()
        );
        assert!(report.peak_memory_kb > 0);
        assert!(
            report
                .samples
                .windows(2)
                .all(|w| w[0].timestamp <= w[1].timestamp)
        );
    }

    #[tokio::test]
    async fn test_no_samples_after_stop() {
        let mut child = Command::new("sleep")
            .arg("2")
            .kill_on_drop(true)
            .spawn()
            .expect("Failed to spawn sleep");
        let pid = child.id().expect("child pid");

        let mut handle = ResourceSampler::start(pid, Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;
        let report = handle.stop().await;
        let count = report.samples.len();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(handle.stop().await.samples.len(), count);
        assert!(handle.is_finished());

        child.kill().await.unwrap();
    }
}
