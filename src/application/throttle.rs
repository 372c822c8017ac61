use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use futures::future::BoxFuture;
use tokio::sync::{Mutex, oneshot};
use tracing::debug;

use crate::domain::errors::ThrottleError;

/// Drain state. At most one drain task exists at a time: `schedule` only
/// spawns one on the Idle -> Draining transition, and the drain flips back
/// to Idle before exiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DrainState {
    Idle,
    Draining,
}

type Job = BoxFuture<'static, ()>;

struct Inner {
    queue: VecDeque<Job>,
    state: DrainState,
}

/// Spaces out submitted tasks so that dispatches start no more often than a
/// configured requests-per-minute rate, regardless of how fast callers
/// submit. Tasks are dispatched strictly in submission order.
pub struct Throttle {
    interval: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl Throttle {
    /// Duration between dispatches is 60s / rate. Sub-millisecond intervals
    /// are allowed and still elapsed; no floor is applied.
    pub fn new(requests_per_minute: u32) -> Result<Self, ThrottleError> {
        if requests_per_minute == 0 {
            return Err(ThrottleError::InvalidRate {
                rate: requests_per_minute,
            });
        }

        Ok(Self {
            interval: Duration::from_secs_f64(60.0 / f64::from(requests_per_minute)),
            inner: Arc::new(Mutex::new(Inner {
                queue: VecDeque::new(),
                state: DrainState::Idle,
            })),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Enqueue `task` and wait for its outcome. The returned result is the
    /// task's own: failures pass through untouched and do not block or
    /// cancel later queued tasks. The caller observes both the queueing
    /// delay and the task's own latency.
    pub async fn schedule<T, F>(&self, task: F) -> Result<T>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let job: Job = Box::pin(async move {
            let _ = tx.send(task.await);
        });

        let start_drain = {
            let mut inner = self.inner.lock().await;
            inner.queue.push_back(job);
            if inner.state == DrainState::Idle {
                inner.state = DrainState::Draining;
                true
            } else {
                false
            }
        };

        if start_drain {
            self.spawn_drain();
        }

        rx.await
            .map_err(|_| anyhow::anyhow!("throttled task dropped before completion"))?
    }

    fn spawn_drain(&self) {
        let inner = Arc::clone(&self.inner);
        let interval = self.interval;

        tokio::spawn(async move {
            loop {
                let job = {
                    let mut guard = inner.lock().await;
                    match guard.queue.pop_front() {
                        Some(job) => job,
                        None => {
                            guard.state = DrainState::Idle;
                            break;
                        }
                    }
                };

                // Spacing is between dispatch times, not completion times:
                // start the task and sleep without awaiting it.
                tokio::spawn(job);
                tokio::time::sleep(interval).await;
            }

            debug!("throttle queue drained");
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[test]
    fn test_zero_rate_is_rejected() {
        let err = Throttle::new(0).unwrap_err();
        assert!(matches!(err, ThrottleError::InvalidRate { rate: 0 }));
    }

    #[test]
    fn test_interval_derivation() {
        let throttle = Throttle::new(60).unwrap();
        assert_eq!(throttle.interval(), Duration::from_secs(1));

        // Sub-millisecond intervals are kept, not floored.
        let fast = Throttle::new(120_000).unwrap();
        assert_eq!(fast.interval(), Duration::from_micros(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_spacing() {
        let throttle = Arc::new(Throttle::new(60).unwrap());
        let dispatched: Arc<Mutex<Vec<Instant>>> = Arc::new(Mutex::new(Vec::new()));

        let mut handles = Vec::new();
        for _ in 0..3 {
            let throttle = Arc::clone(&throttle);
            let dispatched = Arc::clone(&dispatched);
            handles.push(tokio::spawn(async move {
                throttle
                    .schedule(async move {
                        dispatched.lock().await.push(Instant::now());
                        Ok(())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let times = dispatched.lock().await;
        assert_eq!(times.len(), 3);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fifo_order() {
        let throttle = Arc::new(Throttle::new(6000).unwrap());
        let completed: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));

        let mut results = Vec::new();
        for i in 0..5 {
            let completed = Arc::clone(&completed);
            // Enqueue all five before awaiting any of them.
            results.push(throttle.schedule(async move {
                completed.lock().await.push(i);
                Ok(i)
            }));
        }
        let results = futures::future::join_all(results).await;

        for (i, result) in results.into_iter().enumerate() {
            assert_eq!(result.unwrap(), i);
        }
        assert_eq!(*completed.lock().await, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_passes_through_and_queue_continues() {
        let throttle = Arc::new(Throttle::new(6000).unwrap());

        let failing = throttle.schedule(async { Err::<(), _>(anyhow::anyhow!("boom")) });
        let succeeding = throttle.schedule(async { Ok(42) });
        let (failed, ok) = futures::join!(failing, succeeding);

        assert_eq!(failed.unwrap_err().to_string(), "boom");
        assert_eq!(ok.unwrap(), 42);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drain_restarts_after_queue_empties() {
        let throttle = Arc::new(Throttle::new(600).unwrap());

        let first = throttle.schedule(async { Ok(1) }).await.unwrap();
        // Let the drain observe the empty queue and go idle.
        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = throttle.schedule(async { Ok(2) }).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
    }
}
