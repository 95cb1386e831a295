//! Cancellable delayed actions
//!
//! A [`Debouncer`] holds at most one outstanding timer. Scheduling a new
//! action cancels the previous timer if it has not fired yet, so only the
//! last action of a burst runs.
//!
//! Cancellation only ever affects the timer. Once an action has started it
//! runs to completion on its own task, even if a newer action is scheduled.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Single-slot debounce timer
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer with the given quiet period
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Quiet period before an action fires
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `action` after the quiet period, replacing any pending action
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Detach so that a later `schedule` cannot abort work in flight
            tokio::spawn(action);
        });

        let previous = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(timer);

        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Cancel the pending action, if any
    pub fn cancel(&self) {
        if let Some(timer) = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            timer.abort();
        }
    }

    /// Whether a timer is still waiting to fire
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    type Fired = Arc<Mutex<Vec<&'static str>>>;

    fn record(fired: &Fired, label: &'static str) -> impl Future<Output = ()> + Send + 'static {
        let fired = fired.clone();
        async move {
            fired.lock().unwrap().push(label);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_last_action_in_burst_fires() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let fired = Fired::default();

        debouncer.schedule(record(&fired, "a"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(&fired, "ad"));
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.schedule(record(&fired, "ada"));

        tokio::time::sleep(Duration::from_millis(299)).await;
        settle().await;
        assert!(fired.lock().unwrap().is_empty());
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(*fired.lock().unwrap(), vec!["ada"]);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let fired = Fired::default();

        debouncer.schedule(record(&fired, "first"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        settle().await;
        debouncer.schedule(record(&fired, "second"));
        tokio::time::sleep(Duration::from_millis(400)).await;
        settle().await;

        assert_eq!(*fired.lock().unwrap(), vec!["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_action() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();

        debouncer.schedule(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(1)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_running_action_survives_reschedule() {
        let debouncer = Debouncer::new(Duration::from_millis(300));
        let finished = Arc::new(AtomicUsize::new(0));
        let done = finished.clone();

        debouncer.schedule(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            done.fetch_add(1, Ordering::SeqCst);
        });
        tokio::time::sleep(Duration::from_millis(350)).await;
        settle().await;

        // The first action is now in flight; a new burst must not abort it
        debouncer.schedule(async {});
        tokio::time::sleep(Duration::from_secs(1)).await;
        settle().await;

        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }
}
