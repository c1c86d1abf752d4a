// Tests for the blocking-compute handler.
//
// The models sleep rather than spin so the timing checks don't depend on
// how many cores the test machine has.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use homework::worker::{Handler, Model};

const WORK: Duration = Duration::from_millis(300);

struct SleepyModel {
    calls: AtomicUsize,
}

impl Model for SleepyModel {
    fn compute(&self) -> Result<()> {
        std::thread::sleep(WORK);
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn sleepy() -> Arc<SleepyModel> {
    Arc::new(SleepyModel {
        calls: AtomicUsize::new(0),
    })
}

#[tokio::test]
async fn concurrent_requests_overlap() {
    let model = sleepy();
    let handler = Handler::new(model.clone());

    let started = Instant::now();
    handler.handle_request().await.unwrap();
    let single = started.elapsed();

    let started = Instant::now();
    let results = futures::future::join_all((0..5).map(|_| handler.handle_request())).await;
    let many = started.elapsed();

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(model.calls.load(Ordering::SeqCst), 6);
    assert!(
        many < single * 2,
        "5 concurrent requests took {many:?}, one took {single:?}"
    );
}

#[tokio::test]
async fn handle_many_respects_concurrency_limit() {
    let model = sleepy();
    let handler = Handler::new(model.clone());

    let started = Instant::now();
    let completed = handler.handle_many(4, 2).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(completed, 4);
    assert_eq!(model.calls.load(Ordering::SeqCst), 4);
    // Two waves of two
    assert!(elapsed >= WORK * 2, "finished too fast: {elapsed:?}");
}

#[tokio::test]
async fn progress_callback_counts_up() {
    let handler = Handler::new(sleepy());
    let mut seen = Vec::new();
    handler
        .handle_many_with_progress(3, 3, |done| seen.push(done))
        .await
        .unwrap();
    assert_eq!(seen, vec![1, 2, 3]);
}
