// Request handler for CPU-heavy models.
//
// `Model::compute` is blocking. Running it directly inside an async task
// would stall the runtime and serialize concurrent requests, so each call
// is moved onto tokio's blocking thread pool. Several `handle_request`s
// awaited together then take about as long as one.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info};

/// A model with a blocking, CPU-bound computation.
pub trait Model: Send + Sync + 'static {
    fn compute(&self) -> Result<()>;
}

/// Serves requests against a shared model.
#[derive(Clone)]
pub struct Handler {
    model: Arc<dyn Model>,
}

impl Handler {
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model }
    }

    /// Run one `compute()` on the blocking pool and wait for it.
    pub async fn handle_request(&self) -> Result<()> {
        let model = Arc::clone(&self.model);
        let started = Instant::now();

        tokio::task::spawn_blocking(move || model.compute())
            .await
            .context("spawn_blocking panicked")??;

        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "Request handled");
        Ok(())
    }

    /// Run `requests` requests with at most `concurrency` in flight.
    /// Stops at the first failure; returns how many completed.
    pub async fn handle_many(&self, requests: usize, concurrency: usize) -> Result<usize> {
        self.handle_many_with_progress(requests, concurrency, |_| {})
            .await
    }

    /// Like `handle_many`, calling `on_done` with the running total after
    /// each completed request.
    pub async fn handle_many_with_progress<F>(
        &self,
        requests: usize,
        concurrency: usize,
        mut on_done: F,
    ) -> Result<usize>
    where
        F: FnMut(usize),
    {
        let started = Instant::now();
        let mut completed = 0usize;

        let mut results = std::pin::pin!(stream::iter(0..requests)
            .map(|_| self.handle_request())
            .buffer_unordered(concurrency.max(1)));

        while let Some(()) = results.try_next().await? {
            completed += 1;
            on_done(completed);
        }

        info!(
            requests = completed,
            concurrency,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Handled requests"
        );
        Ok(completed)
    }
}

/// Model that keeps a CPU busy for a fixed duration.
pub struct BusyModel {
    pub duration: Duration,
}

impl Model for BusyModel {
    fn compute(&self) -> Result<()> {
        let deadline = Instant::now() + self.duration;
        let mut x: u64 = 0;
        while Instant::now() < deadline {
            x = std::hint::black_box(x.wrapping_mul(6364136223846793005).wrapping_add(1));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Model for Failing {
        fn compute(&self) -> Result<()> {
            anyhow::bail!("model exploded")
        }
    }

    #[tokio::test]
    async fn compute_error_propagates() {
        let handler = Handler::new(Arc::new(Failing));
        let err = handler.handle_request().await.unwrap_err();
        assert!(err.to_string().contains("exploded"));
        assert!(handler.handle_many(3, 2).await.is_err());
    }

    #[tokio::test]
    async fn zero_requests_is_fine() {
        let handler = Handler::new(Arc::new(BusyModel {
            duration: Duration::from_millis(1),
        }));
        assert_eq!(handler.handle_many(0, 4).await.unwrap(), 0);
    }
}
