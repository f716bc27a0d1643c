//! Ctrl-C as a window close.
//!
//! The backend lives in its own process group, so a terminal Ctrl-C only
//! reaches bonnet. Without a handler bonnet would die on the default action
//! and leave the backend running. Routing it through the UI terminator lets
//! the coordinator interrupt and reap the backend instead.

use std::sync::Arc;

use bonnet_core::api::UiTerminator;
use tokio::runtime::Handle;

/// Installs the handler before returning, then closes the UI on every Ctrl-C.
pub fn close_on_ctrl_c(terminator: Arc<dyn UiTerminator>, rt: &Handle) -> std::io::Result<()> {
    let _guard = rt.enter();
    let mut interrupts = listen()?;
    rt.spawn(async move {
        while interrupts.recv().await.is_some() {
            tracing::info!("ctrl-c received, closing");
            terminator.terminate();
        }
    });
    Ok(())
}

#[cfg(unix)]
fn listen() -> std::io::Result<tokio::signal::unix::Signal> {
    use tokio::signal::unix::{signal, SignalKind};

    signal(SignalKind::interrupt())
}

#[cfg(windows)]
fn listen() -> std::io::Result<tokio::signal::windows::CtrlC> {
    tokio::signal::windows::ctrl_c()
}
