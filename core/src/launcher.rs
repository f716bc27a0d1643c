use tokio::runtime::Handle;

use crate::config::BonnetConfig;
use crate::coordinator::{Coordinator, RunReport};
use crate::logging::Logger;
use crate::supervisor::{ProcessLauncher, Supervisor};
use crate::ui::UiLifecycle;

/// Starts the backend next to an already constructed UI and runs both to completion.
pub struct Launcher {
    config: BonnetConfig,
    sink: Logger,
}

impl Launcher {
    pub fn new(config: BonnetConfig, sink: Logger) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &BonnetConfig {
        &self.config
    }

    /// Blocks until the UI is closed and the backend, if any, is reaped.
    /// A backend that cannot be started is logged and the UI runs alone.
    pub fn launch_and_wait(
        &self,
        ui: &mut dyn UiLifecycle,
        process_launcher: &dyn ProcessLauncher,
        rt: &Handle,
    ) -> RunReport {
        self.log("started");
        for line in config_lines(&self.config) {
            self.log(&line);
        }

        let supervisor = match self.config.launch_config() {
            None => None,
            Some(launch) => {
                match rt.block_on(Supervisor::start(process_launcher, &launch, self.sink.clone())) {
                    Ok(sup) => Some(sup),
                    Err(e) => {
                        tracing::error!(error.kind = "backend.start_failed", error = %e);
                        self.sink.log_from_bonnet(&e.to_string());
                        None
                    }
                }
            }
        };

        let report = Coordinator::new(self.sink.clone()).run(ui, supervisor, rt);

        self.log("ended");
        report
    }

    fn log(&self, message: &str) {
        tracing::info!("{message}");
        self.sink.log_from_bonnet(message);
    }
}

fn config_lines(cfg: &BonnetConfig) -> Vec<String> {
    let mut lines = vec![
        format!("config: url={}", cfg.window.url),
        format!("config: title={}", cfg.window.title),
    ];
    if cfg.window.fullscreen {
        lines.push("config: fullscreen=true".to_string());
    } else {
        lines.push(format!(
            "config: size={}x{}",
            cfg.window.width, cfg.window.height
        ));
    }
    if cfg.window.maximize {
        lines.push("config: maximize=true".to_string());
    }
    if cfg.window.debug {
        lines.push("config: debug=true".to_string());
    }
    if let Some(icon) = cfg.window.icon.as_deref() {
        lines.push(format!("config: icon={icon}"));
    }

    match cfg.launch_config() {
        None => lines.push("config: backend=<none>".to_string()),
        Some(launch) => {
            lines.push(format!("config: backend={}", launch.command));
            if !launch.args.is_empty() {
                lines.push(format!("config: backend_args={:?}", launch.args));
            }
            if let Some(dir) = launch.workdir.as_deref() {
                lines.push(format!("config: backend_workdir={dir}"));
            }
            lines.push(format!("config: backend_console={}", launch.show_console));
            lines.push(format!("config: backend_log={}", launch.capture_output));
            if let Some(grace) = launch.stop_grace_ms {
                lines.push(format!("config: stop_grace_ms={grace}"));
            }
        }
    }
    lines
}
