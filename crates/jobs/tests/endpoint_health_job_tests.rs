use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use veil_dns_application::ports::EndpointProbePort;
use veil_dns_jobs::EndpointHealthJob;

struct MockProber {
    probes: AtomicUsize,
}

impl MockProber {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            probes: AtomicUsize::new(0),
        })
    }

    fn probes(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EndpointProbePort for MockProber {
    async fn probe_all(&self) {
        self.probes.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn probes_on_each_tick() {
    let prober = MockProber::new();
    let token = CancellationToken::new();
    let job = Arc::new(
        EndpointHealthJob::new(prober.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    let handle = tokio::spawn(job.start());
    tokio::time::sleep(Duration::from_millis(1200)).await;
    token.cancel();
    handle.await.unwrap();

    assert!(prober.probes() >= 2);
}

#[tokio::test]
async fn stops_on_cancellation() {
    let prober = MockProber::new();
    let token = CancellationToken::new();
    let job = Arc::new(
        EndpointHealthJob::new(prober.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    let handle = tokio::spawn(job.start());
    tokio::time::sleep(Duration::from_millis(100)).await;
    token.cancel();
    handle.await.unwrap();

    let after_cancel = prober.probes();
    tokio::time::sleep(Duration::from_millis(1200)).await;
    assert_eq!(prober.probes(), after_cancel);
}
