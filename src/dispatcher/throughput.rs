//! Throughput-limited dispatcher: bounded concurrency plus a rolling-window
//! rate cap (spec §4.2 "Throughput-limited").

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Semaphore;

use super::traits::{DispatchTask, Dispatcher};

/// Continuous token bucket: tokens accrue every tick rather than only at
/// batch boundaries, so `max_per_second` is a genuine rolling-window bound
/// (SPEC_FULL §5 Open Question 4) rather than a per-batch cap.
struct TokenBucket {
    capacity: f64,
    state: Mutex<(f64, Instant)>,
}

impl TokenBucket {
    fn new(capacity: f64) -> Self {
        Self {
            capacity,
            state: Mutex::new((capacity, Instant::now())),
        }
    }

    /// Block until a token is available, consuming it.
    async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock();
                let now = Instant::now();
                let elapsed = now.duration_since(state.1).as_secs_f64();
                state.1 = now;
                state.0 = (state.0 + elapsed * self.capacity).min(self.capacity);
                if state.0 >= 1.0 {
                    state.0 -= 1.0;
                    None
                } else {
                    let deficit = 1.0 - state.0;
                    Some(Duration::from_secs_f64(deficit / self.capacity.max(f64::EPSILON)))
                }
            };
            match wait {
                None => return,
                Some(delay) => tokio::time::sleep(delay).await,
            }
        }
    }
}

/// Parameters for [`ThroughputDispatcher`] (spec §6 Props table).
#[derive(Debug, Clone, Copy)]
pub struct ThroughputConfig {
    /// Maximum number of tasks that may *begin* in any rolling 1-second
    /// window (spec §8 Law).
    pub max_per_second: u32,
    /// Maximum number of tasks admitted concurrently.
    pub batch_size: usize,
}

impl Default for ThroughputConfig {
    fn default() -> Self {
        Self {
            max_per_second: 100,
            batch_size: 10,
        }
    }
}

/// Dispatcher that admits at most `batch_size` tasks concurrently and limits
/// task starts to `max_per_second` over any rolling 1-second window.
///
/// Concurrency is bounded by a semaphore; rate is bounded by a continuously
/// refilling token bucket consulted before each task actually begins
/// running. Both gates apply to every `schedule` call, so callers may invoke
/// `schedule` concurrently from multiple mailboxes sharing one dispatcher
/// instance (spec §4.2: "multiple mailboxes share one dispatcher instance
/// fairly by insertion order" — the semaphore's FIFO wait queue provides
/// that fairness).
pub struct ThroughputDispatcher {
    config: ThroughputConfig,
    admission: Arc<Semaphore>,
    bucket: Arc<TokenBucket>,
}

impl ThroughputDispatcher {
    /// Construct a dispatcher with the given throughput parameters.
    pub fn new(config: ThroughputConfig) -> Self {
        Self {
            admission: Arc::new(Semaphore::new(config.batch_size.max(1))),
            bucket: Arc::new(TokenBucket::new(f64::from(config.max_per_second.max(1)))),
            config,
        }
    }

    /// The configured parameters.
    pub fn config(&self) -> ThroughputConfig {
        self.config
    }
}

#[async_trait]
impl Dispatcher for ThroughputDispatcher {
    async fn schedule(&self, task: DispatchTask) {
        let permit = self
            .admission
            .acquire()
            .await
            .unwrap_or_else(|_| unreachable!("semaphore is never closed"));
        self.bucket.acquire().await;
        task.await;
        drop(permit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration as StdDuration;

    #[tokio::test]
    async fn admits_within_batch_concurrently() {
        let dispatcher = Arc::new(ThroughputDispatcher::new(ThroughputConfig {
            max_per_second: 10,
            batch_size: 2,
        }));
        let started = Arc::new(AtomicU32::new(0));
        let mut handles = Vec::new();
        for _ in 0..5 {
            let dispatcher = dispatcher.clone();
            let started = started.clone();
            handles.push(tokio::spawn(async move {
                dispatcher
                    .schedule(Box::pin(async move {
                        started.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(StdDuration::from_millis(10)).await;
                    }))
                    .await;
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(started.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn rate_limits_over_rolling_window() {
        let dispatcher = Arc::new(ThroughputDispatcher::new(ThroughputConfig {
            max_per_second: 3,
            batch_size: 3,
        }));
        let start = Instant::now();
        let mut handles = Vec::new();
        for _ in 0..6 {
            let dispatcher = dispatcher.clone();
            handles.push(tokio::spawn(
                async move { dispatcher.schedule(Box::pin(async {})).await },
            ));
        }
        for h in handles {
            h.await.unwrap();
        }
        // 6 tasks at a max rate of 3/s must take at least ~1s to all start.
        assert!(start.elapsed() >= StdDuration::from_millis(900));
    }
}
