//! Shutdown coordination for the server.

use std::sync::Arc;

use tokio::sync::watch;

/// Coordinator for graceful shutdown.
///
/// Holds a watch channel that the serve loop and the signal watcher
/// subscribe to. Cloning yields another handle to the same channel, which is
/// how `stop()` reaches a server that is already running.
///
/// A trigger is sticky: receivers created after `trigger` still observe it,
/// so a stop requested before the serve loop subscribes is not lost.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: Arc<watch::Sender<bool>>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        tracing::info!("Shutting down");
        self.tx.send_replace(true);
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once shutdown has been requested.
    pub async fn wait(&self) {
        Self::stopped(self.subscribe()).await;
    }

    /// Resolve once `rx` observes a shutdown request.
    pub(crate) async fn stopped(mut rx: watch::Receiver<bool>) {
        // Err means every sender is gone; nothing can trigger any more.
        let observed = rx.wait_for(|stopped| *stopped).await.is_ok();
        if !observed {
            std::future::pending::<()>().await;
        }
    }

    /// Get the number of active subscribers (tasks still running).
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn trigger_reaches_every_subscriber() {
        let shutdown = Shutdown::new();
        let a = shutdown.subscribe();
        let b = shutdown.clone().subscribe();
        assert_eq!(shutdown.receiver_count(), 2);

        shutdown.trigger();
        Shutdown::stopped(a).await;
        Shutdown::stopped(b).await;
    }

    #[test]
    fn trigger_without_subscribers_is_harmless() {
        let shutdown = Shutdown::new();
        shutdown.trigger();
        assert!(shutdown.is_triggered());
    }

    #[tokio::test]
    async fn trigger_before_subscribe_is_kept() {
        let shutdown = Shutdown::new();
        shutdown.clone().trigger();

        let late = shutdown.subscribe();
        tokio::time::timeout(Duration::from_secs(1), Shutdown::stopped(late))
            .await
            .expect("late subscriber missed the trigger");
    }

    #[tokio::test]
    async fn wait_blocks_until_triggered() {
        let shutdown = Shutdown::new();
        assert!(!shutdown.is_triggered());

        let waiter = tokio::spawn({
            let shutdown = shutdown.clone();
            async move { shutdown.wait().await }
        });
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter did not wake")
            .unwrap();
    }
}
