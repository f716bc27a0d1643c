use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonnetConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BonnetConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.title.trim().is_empty() {
            return Err(ConfigError::Invalid("window title must not be empty".into()));
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.backend.path.trim().is_empty() {
            if !self.backend.args.is_empty() {
                return Err(ConfigError::Invalid(
                    "backend arguments given without a backend".into(),
                ));
            }
            if self.backend.workdir.is_some() {
                return Err(ConfigError::Invalid(
                    "backend workdir given without a backend".into(),
                ));
            }
        }
        Ok(())
    }

    /// Resolved settings for the backend process, or `None` when no backend is configured.
    pub fn launch_config(&self) -> Option<LaunchConfig> {
        let command = self.backend.path.trim();
        if command.is_empty() {
            return None;
        }
        Some(LaunchConfig {
            command: command.to_string(),
            workdir: self
                .backend
                .workdir
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            args: self.backend.args.clone(),
            show_console: self.backend.show_console,
            capture_output: self.logging.enabled && !self.backend.no_log,
            stop_grace_ms: self.backend.stop_grace_ms,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// Navigation url for the embedded browser view.
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Borderless fullscreen. Ignored when both width and height are passed on the command line.
    #[serde(default)]
    pub fullscreen: bool,

    #[serde(default)]
    pub maximize: bool,

    /// Enables the browser dev tools.
    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub icon: Option<String>,
}

fn default_title() -> String {
    "bonnet".to_string()
}

fn default_width() -> u32 {
    700
}

fn default_height() -> u32 {
    600
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            url: String::new(),
            width: default_width(),
            height: default_height(),
            fullscreen: false,
            maximize: false,
            debug: false,
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend executable. Empty means UI-only.
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub workdir: Option<String>,

    #[serde(default)]
    pub args: Vec<String>,

    /// Give the backend its own visible console instead of a hidden one.
    #[serde(default)]
    pub show_console: bool,

    /// Do not capture backend output into the log file.
    #[serde(default)]
    pub no_log: bool,

    /// Force-kill the backend if it has not honored the interrupt after this long.
    /// Unset waits indefinitely.
    #[serde(default)]
    pub stop_grace_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// Append-only log file receiving `[bonnet]` lines and raw backend output.
    #[serde(default = "default_logging_file")]
    pub file: String,

    /// EnvFilter string, e.g. "info" or "bonnet_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// If true, diagnostics go to stderr instead of `<file>.trace`.
    #[serde(default)]
    pub console: bool,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_file() -> String {
    "bonnet.log".to_string()
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            file: default_logging_file(),
            level: default_logging_level(),
            console: false,
        }
    }
}

/// What the supervisor needs to start one backend process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    pub command: String,
    pub workdir: Option<String>,
    pub args: Vec<String>,
    pub show_console: bool,
    pub capture_output: bool,
    pub stop_grace_ms: Option<u64>,
}

impl LaunchConfig {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            workdir: None,
            args: Vec::new(),
            show_console: false,
            capture_output: true,
            stop_grace_ms: None,
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }

    pub fn with_workdir(mut self, workdir: impl Into<String>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    pub fn with_stop_grace_ms(mut self, grace_ms: u64) -> Self {
        self.stop_grace_ms = Some(grace_ms);
        self
    }
}
