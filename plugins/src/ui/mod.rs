mod headless;
mod signal;
#[cfg(feature = "webview")]
mod webview;

pub use headless::HeadlessUi;
pub use signal::close_on_ctrl_c;
#[cfg(feature = "webview")]
pub use webview::WebviewUi;
