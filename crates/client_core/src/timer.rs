use std::time::Duration;

use tokio::task::JoinHandle;

/// Callback run once after a delay on the current tokio runtime.
///
/// Cancelling or dropping the timer aborts the pending task, so the callback
/// never runs after its owner is gone.
#[derive(Debug)]
pub struct OneShotTimer {
    handle: JoinHandle<()>,
}

impl OneShotTimer {
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// True once the callback ran or the timer was cancelled.
    pub fn is_settled(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for OneShotTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
