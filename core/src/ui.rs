//! Boundary to the window/browser front-end.

use std::sync::Arc;

use crate::error::UiError;

/// The UI event loop. Lives on the thread that created it.
pub trait UiLifecycle {
    /// Blocks until the window is closed, by the user or through a terminator.
    fn run(&mut self) -> Result<(), UiError>;

    /// A handle that can close the UI from another thread.
    fn terminator(&self) -> Arc<dyn UiTerminator>;
}

pub trait UiTerminator: Send + Sync {
    /// Requests the event loop to return. Safe to call more than once.
    fn terminate(&self);
}
