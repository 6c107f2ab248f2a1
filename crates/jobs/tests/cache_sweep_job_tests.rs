use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use veil_dns_application::ports::CacheMaintenancePort;
use veil_dns_jobs::CacheSweepJob;

struct MockCache {
    sweeps: AtomicUsize,
    removed_per_sweep: usize,
}

impl MockCache {
    fn new(removed_per_sweep: usize) -> Arc<Self> {
        Arc::new(Self {
            sweeps: AtomicUsize::new(0),
            removed_per_sweep,
        })
    }

    fn sweeps(&self) -> usize {
        self.sweeps.load(Ordering::SeqCst)
    }
}

impl CacheMaintenancePort for MockCache {
    fn sweep_expired(&self) -> usize {
        self.sweeps.fetch_add(1, Ordering::SeqCst);
        self.removed_per_sweep
    }

    fn len(&self) -> usize {
        0
    }
}

#[tokio::test]
async fn sweeps_on_each_tick() {
    let cache = MockCache::new(2);
    let token = CancellationToken::new();
    let job = Arc::new(
        CacheSweepJob::new(cache.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    let handle = tokio::spawn(job.start());
    tokio::time::sleep(Duration::from_millis(1200)).await;
    token.cancel();
    handle.await.unwrap();

    // First tick fires immediately, the second after one interval.
    assert!(cache.sweeps() >= 2, "expected >= 2 sweeps, got {}", cache.sweeps());
}

#[tokio::test]
async fn stops_on_cancellation() {
    let cache = MockCache::new(0);
    let token = CancellationToken::new();
    let job = Arc::new(
        CacheSweepJob::new(cache.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    let handle = tokio::spawn(job.start());
    tokio::time::sleep(Duration::from_millis(100)).await;
    token.cancel();
    handle.await.unwrap();

    let after_cancel = cache.sweeps();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(cache.sweeps(), after_cancel);
}
