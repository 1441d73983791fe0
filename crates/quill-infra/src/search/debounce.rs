//! Cancellable debounce timer.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Runs at most one pending action after a quiet period.
///
/// `arm` cancels whatever is pending and schedules the new action; `cancel`
/// aborts it, including an action that has already started. Dropping the
/// debouncer cancels too, so tearing down its owner never leaves a timer
/// behind. Must be used inside a Tokio runtime.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `action` to run after `delay`, replacing any pending action.
    pub fn arm<F>(&mut self, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        }));
    }

    /// Abort the pending action. Returns whether one was still running.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => {
                let live = !handle.is_finished();
                handle.abort();
                live
            }
            None => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
