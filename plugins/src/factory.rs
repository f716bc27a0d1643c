use bonnet_core::api::{ProcessLauncher, UiError, UiLifecycle, WindowConfig};
use tokio::runtime::Handle;

use crate::runner::OsProcessLauncher;
use crate::ui::{close_on_ctrl_c, HeadlessUi};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiKind {
    Headless,
    #[cfg(feature = "webview")]
    Webview,
}

impl UiKind {
    /// Webview when compiled in, headless otherwise.
    pub fn preferred() -> Self {
        #[cfg(feature = "webview")]
        {
            UiKind::Webview
        }
        #[cfg(not(feature = "webview"))]
        {
            UiKind::Headless
        }
    }
}

pub fn build_launcher() -> Box<dyn ProcessLauncher> {
    Box::new(OsProcessLauncher::new())
}

/// Builds the front-end on the calling thread. Every kind closes on Ctrl-C.
pub fn build_ui(
    kind: UiKind,
    cfg: &WindowConfig,
    rt: &Handle,
) -> Result<Box<dyn UiLifecycle>, UiError> {
    let ui: Box<dyn UiLifecycle> = match kind {
        UiKind::Headless => Box::new(HeadlessUi::new(cfg.title.clone())),
        #[cfg(feature = "webview")]
        UiKind::Webview => Box::new(crate::ui::WebviewUi::new(cfg)?),
    };

    if let Err(e) = close_on_ctrl_c(ui.terminator(), rt) {
        tracing::warn!(error.kind = "ui.ctrl_c_handler", error = %e, "ctrl-c will not close the ui");
    }
    Ok(ui)
}
