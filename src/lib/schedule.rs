//! Cancellable delayed callbacks for UI timers (toast dismissal, delayed
//! navigation). A scheduled task is aborted when its handle is dropped, so a
//! timer never fires after the page that owns it has gone away.

use std::{future::Future, time::Duration};
use tokio::task::JoinHandle;

/// Handle to a callback scheduled to run after a delay.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Runs `callback` once `delay` has elapsed on the current Tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn after<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self::after_async(delay, async move { callback() })
    }

    /// Awaits `work` once `delay` has elapsed.
    ///
    /// # Panics
    /// Panics when called outside a Tokio runtime.
    pub fn after_async<Fut>(delay: Duration, work: Fut) -> Self
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            work.await;
        });
        Self { handle }
    }

    /// Cancels the callback if it has not run yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };

    fn flag() -> (Arc<AtomicBool>, impl FnOnce() + Send + 'static) {
        let fired = Arc::new(AtomicBool::new(false));
        let setter = Arc::clone(&fired);
        (fired, move || setter.store(true, Ordering::SeqCst))
    }

    #[tokio::test(start_paused = true)]
    async fn fires_after_delay() {
        let (fired, callback) = flag();
        let task = ScheduledTask::after(Duration::from_millis(1500), callback);

        tokio::time::sleep(Duration::from_millis(1499)).await;
        assert!(!fired.load(Ordering::SeqCst));

        tokio::time::sleep(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(fired.load(Ordering::SeqCst));
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_callback() {
        let (fired, callback) = flag();
        let task = ScheduledTask::after(Duration::from_secs(1), callback);
        task.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn drop_prevents_callback() {
        let (fired, callback) = flag();
        drop(ScheduledTask::after(Duration::from_secs(1), callback));

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(!fired.load(Ordering::SeqCst));
    }
}
