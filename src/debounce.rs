//! Debouncing of rapidly changing values.
//!
//! A [`Debouncer`] holds a stable value that only takes on an observed value
//! once no newer observation has arrived for the debounce delay. Timers run
//! on the Tokio clock, so `observe` must be called from within a runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Delays propagation of a value until it has been stable for a quiet period.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    stable: Arc<watch::Sender<T>>,
    // Bumped by every observation and cancellation. A countdown only
    // publishes if the generation it was started with is still current.
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl<T> Debouncer<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a debouncer whose stable value starts at `initial`.
    pub fn new(initial: T, delay: Duration) -> Self {
        let (stable, _) = watch::channel(initial);
        Self {
            delay,
            stable: Arc::new(stable),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Observe a new value and return the current stable value.
    ///
    /// Restarts the countdown; any earlier pending value is dropped.
    pub fn observe(&mut self, value: T) -> T {
        self.observe_with_delay(value, self.delay)
    }

    /// Observe a new value with an explicit quiet period.
    pub fn observe_with_delay(&mut self, value: T, delay: Duration) -> T {
        self.cancel();
        let generation = self.generation.load(Ordering::SeqCst);
        let current = Arc::clone(&self.generation);
        let stable = Arc::clone(&self.stable);

        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            stable.send_if_modified(|slot| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *slot = value;
                true
            });
        }));

        self.current()
    }

    /// The current stable value.
    #[must_use]
    pub fn current(&self) -> T {
        self.stable.borrow().clone()
    }

    /// Watch the stable value for changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.stable.subscribe()
    }

    /// Check whether a countdown is still running.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Drop the pending value, if any, without publishing it.
    pub fn cancel(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Cancel any pending value and publish `value` immediately.
    pub fn reset(&mut self, value: T) {
        self.cancel();
        self.stable.send_replace(value);
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::sleep;

    const DELAY: Duration = Duration::from_millis(500);

    /// Record every stable value published after subscription.
    fn record(debouncer: &Debouncer<String>) -> Arc<Mutex<Vec<String>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut rx = debouncer.subscribe();
        let sink = Arc::clone(&seen);
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let value = rx.borrow_and_update().clone();
                sink.lock().unwrap().push(value);
            }
        });
        seen
    }

    #[tokio::test(start_paused = true)]
    async fn test_value_published_after_quiet_period() {
        let mut debouncer = Debouncer::new(String::new(), DELAY);
        assert_eq!(debouncer.observe("milk".to_string()), "");
        assert!(debouncer.is_pending());

        sleep(DELAY - Duration::from_millis(1)).await;
        assert_eq!(debouncer.current(), "");

        sleep(Duration::from_millis(2)).await;
        assert_eq!(debouncer.current(), "milk");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_updates_only_publish_final_value() {
        let mut debouncer = Debouncer::new(String::new(), DELAY);
        let seen = record(&debouncer);

        for term in ["m", "mi", "mil", "milk"] {
            debouncer.observe(term.to_string());
            sleep(Duration::from_millis(100)).await;
            assert_eq!(debouncer.current(), "");
        }

        sleep(DELAY).await;
        assert_eq!(debouncer.current(), "milk");
        assert_eq!(*seen.lock().unwrap(), vec!["milk".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separated_updates_each_publish() {
        let mut debouncer = Debouncer::new(String::new(), DELAY);
        let seen = record(&debouncer);

        debouncer.observe("a".to_string());
        sleep(DELAY + Duration::from_millis(10)).await;
        debouncer.observe("b".to_string());
        sleep(DELAY + Duration::from_millis(10)).await;

        assert_eq!(*seen.lock().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_value() {
        let mut debouncer = Debouncer::new("start".to_string(), DELAY);
        debouncer.observe("never".to_string());
        debouncer.cancel();

        sleep(DELAY * 2).await;
        assert_eq!(debouncer.current(), "start");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_publishes_immediately() {
        let mut debouncer = Debouncer::new("old".to_string(), DELAY);
        debouncer.observe("pending".to_string());
        debouncer.reset(String::new());
        assert_eq!(debouncer.current(), "");

        sleep(DELAY * 2).await;
        assert_eq!(debouncer.current(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_delay() {
        let mut debouncer = Debouncer::new(0_u32, DELAY);
        debouncer.observe_with_delay(7, Duration::from_millis(50));
        sleep(Duration::from_millis(60)).await;
        assert_eq!(debouncer.current(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_value() {
        let debouncer_rx = {
            let mut debouncer = Debouncer::new(1_u32, DELAY);
            debouncer.observe(2);
            debouncer.subscribe()
        };
        sleep(DELAY * 2).await;
        assert_eq!(*debouncer_rx.borrow(), 1);
    }
}
