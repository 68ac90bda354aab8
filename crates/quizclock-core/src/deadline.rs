//! One-shot countdown that races the answer loop.

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A timer task that fires once, `limit` after it is armed, unless cancelled.
pub struct DeadlineWatcher {
    fired: Option<oneshot::Receiver<()>>,
    task: JoinHandle<()>,
}

impl DeadlineWatcher {
    /// Spawn the countdown. Must be called inside a tokio runtime.
    pub fn arm(limit: Duration) -> Self {
        let (tx, fired) = oneshot::channel();
        let task = tokio::spawn(async move {
            tokio::time::sleep(limit).await;
            tracing::debug!(?limit, "deadline reached");
            let _ = tx.send(());
        });
        Self {
            fired: Some(fired),
            task,
        }
    }

    /// Resolves the first time the deadline fires.
    ///
    /// Pends forever once the watcher has been cancelled or has already
    /// reported its expiry.
    pub async fn expired(&mut self) {
        let Some(fired) = self.fired.as_mut() else {
            return std::future::pending().await;
        };
        let outcome = fired.await;
        self.fired = None;
        if outcome.is_err() {
            // Sender dropped without sending: the countdown was aborted.
            std::future::pending::<()>().await;
        }
    }

    /// Disarm the countdown so it never fires.
    pub fn cancel(&mut self) {
        self.task.abort();
        self.fired = None;
    }

    /// Whether the countdown task is still pending.
    pub fn is_armed(&self) -> bool {
        self.fired.is_some() && !self.task.is_finished()
    }
}

impl Drop for DeadlineWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
