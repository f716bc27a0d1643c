use std::path::PathBuf;

use bonnet_core::api::BonnetConfig;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "bonnet",
    version,
    about = "Launch your front-end and back-end with a single command"
)]
pub struct Args {
    /// TOML config file. Defaults to ./bonnet.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fullscreen borderless mode.
    #[arg(long)]
    pub fullscreen: bool,

    #[arg(long)]
    pub maximize: bool,

    /// Enable the browser dev tools.
    #[arg(long)]
    pub debug: bool,

    /// Window width. Together with --height, turns fullscreen off.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height. Together with --width, turns fullscreen off.
    #[arg(long)]
    pub height: Option<u32>,

    /// Navigation url.
    #[arg(long)]
    pub url: Option<String>,

    /// Window title.
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub icon: Option<String>,

    /// Backend process to run next to the window.
    #[arg(long)]
    pub backend: Option<String>,

    #[arg(long)]
    pub backend_workdir: Option<String>,

    /// One backend argument. Can be specified multiple times.
    #[arg(long = "backend-arg", action = clap::ArgAction::Append, allow_hyphen_values = true)]
    pub backend_arg: Vec<String>,

    /// Show a console for the backend process.
    #[arg(long)]
    pub backend_console: bool,

    /// Do not capture backend output into the log file.
    #[arg(long)]
    pub backend_no_log: bool,

    /// Kill the backend if it ignores the interrupt for this long.
    #[arg(long)]
    pub stop_grace_ms: Option<u64>,

    /// Disable the log file entirely.
    #[arg(long)]
    pub no_log: bool,

    #[arg(long)]
    pub log_file: Option<String>,

    /// Run without a window; Ctrl-C closes.
    #[arg(long)]
    pub headless: bool,

    /// Backend arguments after `--`.
    #[arg(last = true)]
    pub backend_args: Vec<String>,
}

impl Args {
    /// Layers the command line over a loaded config.
    pub fn apply(&self, cfg: &mut BonnetConfig) {
        if self.fullscreen {
            cfg.window.fullscreen = true;
        }
        if self.maximize {
            cfg.window.maximize = true;
        }
        if self.debug {
            cfg.window.debug = true;
        }
        if let Some(width) = self.width {
            cfg.window.width = width;
        }
        if let Some(height) = self.height {
            cfg.window.height = height;
        }
        if self.width.is_some() && self.height.is_some() {
            cfg.window.fullscreen = false;
        }
        if let Some(url) = &self.url {
            cfg.window.url = url.clone();
        }
        if let Some(title) = &self.title {
            cfg.window.title = title.clone();
        }
        if let Some(icon) = &self.icon {
            cfg.window.icon = Some(icon.clone());
        }

        if let Some(backend) = &self.backend {
            cfg.backend.path = backend.clone();
        }
        if let Some(dir) = &self.backend_workdir {
            cfg.backend.workdir = Some(dir.clone());
        }
        if !self.backend_arg.is_empty() || !self.backend_args.is_empty() {
            cfg.backend.args = self
                .backend_arg
                .iter()
                .chain(self.backend_args.iter())
                .cloned()
                .collect();
        }
        if self.backend_console {
            cfg.backend.show_console = true;
        }
        if self.backend_no_log {
            cfg.backend.no_log = true;
        }
        if let Some(grace) = self.stop_grace_ms {
            cfg.backend.stop_grace_ms = Some(grace);
        }

        if self.no_log {
            cfg.logging.enabled = false;
        }
        if let Some(file) = &self.log_file {
            cfg.logging.file = file.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bonnet").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn width_and_height_turn_fullscreen_off() {
        let mut cfg = BonnetConfig::default();
        cfg.window.fullscreen = true;

        parse(&["--width", "800"]).apply(&mut cfg);
        assert!(cfg.window.fullscreen);
        assert_eq!(cfg.window.width, 800);

        parse(&["--fullscreen", "--width", "800", "--height", "500"]).apply(&mut cfg);
        assert!(!cfg.window.fullscreen);
        assert_eq!((cfg.window.width, cfg.window.height), (800, 500));
    }

    #[test]
    fn backend_arguments_keep_their_order() {
        let mut cfg = BonnetConfig::default();
        parse(&[
            "--backend",
            "./server",
            "--backend-arg",
            "--port",
            "--backend-arg",
            "8080",
            "--",
            "--verbose",
            "two words",
        ])
        .apply(&mut cfg);

        assert_eq!(cfg.backend.path, "./server");
        assert_eq!(
            cfg.backend.args,
            vec!["--port", "8080", "--verbose", "two words"]
        );
    }

    #[test]
    fn command_line_overrides_file_values() {
        let mut cfg = BonnetConfig::default();
        cfg.window.url = "http://from-file".into();
        cfg.backend.args = vec!["from-file".into()];

        parse(&["--url", "http://from-cli", "--no-log", "--stop-grace-ms", "1500"]).apply(&mut cfg);

        assert_eq!(cfg.window.url, "http://from-cli");
        assert_eq!(cfg.backend.args, vec!["from-file"]);
        assert!(!cfg.logging.enabled);
        assert_eq!(cfg.backend.stop_grace_ms, Some(1500));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["bonnet", "--nope"]).is_err());
    }
}
