//! Native window with an embedded browser view.

use std::sync::{Arc, Mutex};

use bonnet_core::api::{UiError, UiLifecycle, UiTerminator, WindowConfig};
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::platform::run_return::EventLoopExtRunReturn;
use tao::window::{Fullscreen, Window, WindowBuilder};
use wry::{WebView, WebViewBuilder};

#[derive(Debug, Clone, Copy)]
enum UiEvent {
    Terminate,
}

pub struct WebviewUi {
    event_loop: EventLoop<UiEvent>,
    proxy: EventLoopProxy<UiEvent>,
    _window: Window,
    _webview: WebView,
}

impl WebviewUi {
    /// Must be called on the main thread.
    pub fn new(cfg: &WindowConfig) -> Result<Self, UiError> {
        let event_loop = EventLoopBuilder::<UiEvent>::with_user_event().build();
        let proxy = event_loop.create_proxy();

        let mut builder = WindowBuilder::new()
            .with_title(&cfg.title)
            .with_maximized(cfg.maximize);
        if cfg.fullscreen {
            builder = builder.with_fullscreen(Some(Fullscreen::Borderless(None)));
        } else {
            builder = builder.with_inner_size(LogicalSize::new(
                f64::from(cfg.width),
                f64::from(cfg.height),
            ));
        }
        if let Some(icon) = cfg.icon.as_deref() {
            tracing::warn!(icon, "window icons are not supported by the webview front-end");
        }

        let window = builder
            .build(&event_loop)
            .map_err(|e| UiError::Construction(e.to_string()))?;

        let webview = build_webview(&window, cfg)?;

        Ok(Self {
            event_loop,
            proxy,
            _window: window,
            _webview: webview,
        })
    }
}

fn build_webview(window: &Window, cfg: &WindowConfig) -> Result<WebView, UiError> {
    let builder = WebViewBuilder::new()
        .with_url(cfg.url.as_str())
        .with_devtools(cfg.debug);

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;

        let vbox = window
            .default_vbox()
            .ok_or_else(|| UiError::Construction("window has no gtk container".into()))?;
        builder.build_gtk(vbox)
    };
    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(window);

    webview.map_err(|e| UiError::Construction(e.to_string()))
}

struct ProxyTerminator {
    proxy: Mutex<EventLoopProxy<UiEvent>>,
}

impl UiTerminator for ProxyTerminator {
    fn terminate(&self) {
        let proxy = match self.proxy.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Fails only once the event loop is gone, which is what we wanted.
        let _ = proxy.send_event(UiEvent::Terminate);
    }
}

impl UiLifecycle for WebviewUi {
    fn run(&mut self) -> Result<(), UiError> {
        self.event_loop.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Wait;
            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    tracing::debug!("window close requested");
                    *control_flow = ControlFlow::Exit;
                }
                Event::UserEvent(UiEvent::Terminate) => {
                    tracing::debug!("window terminated");
                    *control_flow = ControlFlow::Exit;
                }
                _ => {}
            }
        });
        Ok(())
    }

    fn terminator(&self) -> Arc<dyn UiTerminator> {
        Arc::new(ProxyTerminator {
            proxy: Mutex::new(self.proxy.clone()),
        })
    }
}
