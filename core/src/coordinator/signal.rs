use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownTrigger {
    UiClosed,
    BackendExited,
}

/// One-shot shutdown trigger shared by the UI thread and the backend watcher.
/// The first `fire` wins; later calls, from either source, change nothing.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    tx: Arc<watch::Sender<Option<ShutdownTrigger>>>,
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Returns `true` if this call was the one that fired the signal.
    pub fn fire(&self, trigger: ShutdownTrigger) -> bool {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(trigger);
            true
        })
    }

    pub fn trigger(&self) -> Option<ShutdownTrigger> {
        *self.tx.borrow()
    }

    pub fn is_fired(&self) -> bool {
        self.trigger().is_some()
    }

    pub async fn fired(&self) -> ShutdownTrigger {
        let mut rx = self.tx.subscribe();
        loop {
            if let Some(trigger) = *rx.borrow_and_update() {
                return trigger;
            }
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}
