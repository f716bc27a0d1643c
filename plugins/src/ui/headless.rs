use std::sync::Arc;

use bonnet_core::api::{UiError, UiLifecycle, UiTerminator};
use tokio::sync::mpsc;

/// Windowless front-end: `run` blocks until `terminate()`.
pub struct HeadlessUi {
    title: String,
    rx: mpsc::UnboundedReceiver<()>,
    terminator: Arc<ChannelTerminator>,
}

struct ChannelTerminator {
    tx: mpsc::UnboundedSender<()>,
}

impl UiTerminator for ChannelTerminator {
    fn terminate(&self) {
        // The receiver is gone once `run` has returned for good.
        let _ = self.tx.send(());
    }
}

impl HeadlessUi {
    pub fn new(title: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            title: title.into(),
            rx,
            terminator: Arc::new(ChannelTerminator { tx }),
        }
    }
}

impl UiLifecycle for HeadlessUi {
    fn run(&mut self) -> Result<(), UiError> {
        tracing::info!(title = %self.title, "headless ui running, press Ctrl-C to close");
        self.rx
            .blocking_recv()
            .ok_or_else(|| UiError::EventLoop("close channel dropped".into()))
    }

    fn terminator(&self) -> Arc<dyn UiTerminator> {
        self.terminator.clone()
    }
}
