//! Delayed re-arm of the recognizer
//!
//! Every scheduled re-arm captures the generation current at scheduling
//! time. Scheduling again or cancelling bumps the generation, so a sleeping
//! task that wakes up to a newer generation does nothing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Default)]
pub struct ReArmScheduler {
    generation: Arc<AtomicU64>,
}

impl ReArmScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidate whatever is pending; returns the new generation
    pub fn cancel(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run `task` after `delay` unless superseded or cancelled first
    ///
    /// Must be called from within a tokio runtime. The handle resolves to
    /// `true` if the task ran.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> JoinHandle<bool>
    where
        F: FnOnce() + Send + 'static,
    {
        let scheduled = self.cancel();
        let generation = Arc::clone(&self.generation);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generation.load(Ordering::SeqCst) != scheduled {
                tracing::trace!(scheduled, "stale re-arm skipped");
                return false;
            }
            task();
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counter() -> (Arc<AtomicUsize>, impl Fn() -> Box<dyn FnOnce() + Send>) {
        let count = Arc::new(AtomicUsize::new(0));
        let make = {
            let count = Arc::clone(&count);
            move || -> Box<dyn FnOnce() + Send> {
                let count = Arc::clone(&count);
                Box::new(move || {
                    count.fetch_add(1, Ordering::SeqCst);
                })
            }
        };
        (count, make)
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let scheduler = ReArmScheduler::new();
        let (count, task) = counter();

        let handle = scheduler.schedule(Duration::from_secs(3), task());

        assert!(handle.await.unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_fire_early() {
        let scheduler = ReArmScheduler::new();
        let (count, task) = counter();

        let _handle = scheduler.schedule(Duration::from_secs(3), task());
        tokio::time::sleep(Duration::from_millis(2900)).await;

        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_schedule_supersedes_older() {
        let scheduler = ReArmScheduler::new();
        let (count, task) = counter();

        let first = scheduler.schedule(Duration::from_secs(3), task());
        tokio::time::sleep(Duration::from_secs(1)).await;
        let second = scheduler.schedule(Duration::from_secs(3), task());

        assert!(!first.await.unwrap());
        assert!(second.await.unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_run() {
        let scheduler = ReArmScheduler::new();
        let (count, task) = counter();

        let handle = scheduler.schedule(Duration::from_secs(3), task());
        scheduler.cancel();

        assert!(!handle.await.unwrap());
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_cancel_bumps_generation() {
        let scheduler = ReArmScheduler::new();
        assert_eq!(scheduler.generation(), 0);
        assert_eq!(scheduler.cancel(), 1);
        assert_eq!(scheduler.clone().cancel(), 2);
        assert_eq!(scheduler.generation(), 2);
    }
}
