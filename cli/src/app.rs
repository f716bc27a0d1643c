//! CLI 装配层：解析配置、构建 UI 与进程启动器，然后把控制权交给 Launcher。
use std::sync::Arc;

use bonnet_core::api as core_api;
use bonnet_plugins::factory::{self, UiKind};

use crate::commands::cli::Args;

/// File config (explicit `--config`, else `./bonnet.toml`) with the command line on top.
pub fn resolve_config(args: &Args) -> Result<core_api::BonnetConfig, core_api::ConfigError> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => core_api::load_from_path(path)?,
        None => core_api::load_default()?,
    };
    args.apply(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}

pub fn ui_kind(args: &Args) -> UiKind {
    if args.headless {
        UiKind::Headless
    } else {
        UiKind::preferred()
    }
}

/// A log file that cannot be opened only costs the log; the app still starts.
pub fn open_log_sink(logging: &core_api::LoggingConfig) -> core_api::Logger {
    match core_api::open_sink(logging) {
        Ok(sink) => sink,
        Err(e) => {
            tracing::warn!(
                error.kind = "log.open_failed",
                file = %logging.file,
                error = %e,
                "continuing without a log file"
            );
            Arc::new(core_api::DiscardSink)
        }
    }
}

/// Builds the UI on the calling thread, then runs UI and backend to completion.
pub fn run_app_with_config(
    args: &Args,
    cfg: core_api::BonnetConfig,
    rt: &tokio::runtime::Runtime,
) -> Result<i32, core_api::LaunchError> {
    let sink = open_log_sink(&cfg.logging);
    let mut ui = factory::build_ui(ui_kind(args), &cfg.window, rt.handle())?;
    let process_launcher = factory::build_launcher();

    let report = core_api::Launcher::new(cfg, sink).launch_and_wait(
        ui.as_mut(),
        process_launcher.as_ref(),
        rt.handle(),
    );

    tracing::debug!(trigger = ?report.trigger, outcome = ?report.outcome, "run finished");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn explicit_config_file_is_merged_with_flags() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            "[window]\ntitle = \"from file\"\nurl = \"http://a\"\n[backend]\npath = \"./srv\""
        )
        .unwrap();
        let path = f.path().display().to_string();

        let args = Args::try_parse_from(["bonnet", "--config", &path, "--url", "http://b"]).unwrap();
        let cfg = resolve_config(&args).unwrap();

        assert_eq!(cfg.window.title, "from file");
        assert_eq!(cfg.window.url, "http://b");
        assert_eq!(cfg.backend.path, "./srv");
    }

    #[test]
    fn invalid_combination_is_a_config_error() {
        let args = Args::try_parse_from([
            "bonnet",
            "--config",
            "/definitely/missing.toml",
        ])
        .unwrap();
        assert!(matches!(
            resolve_config(&args),
            Err(core_api::ConfigError::Io { .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("bonnet.toml");
        std::fs::write(&cfg_path, "").unwrap();
        let path = cfg_path.display().to_string();
        let args =
            Args::try_parse_from(["bonnet", "--config", &path, "--", "orphan-arg"]).unwrap();
        assert!(matches!(
            resolve_config(&args),
            Err(core_api::ConfigError::Invalid(_))
        ));
    }

    const UNWRITABLE_LOG: &str = "/proc/definitely/not/writable/bonnet.log";

    #[test]
    fn unopenable_log_file_falls_back_to_discard() {
        let logging = core_api::LoggingConfig {
            file: UNWRITABLE_LOG.into(),
            ..core_api::LoggingConfig::default()
        };
        assert!(core_api::open_sink(&logging).is_err());

        let sink = open_log_sink(&logging);
        sink.log_from_bonnet("still running");
        assert!(!std::path::Path::new(UNWRITABLE_LOG).exists());
    }

    #[cfg(unix)]
    #[test]
    fn unopenable_log_file_does_not_stop_the_launch() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let args = Args::try_parse_from(["bonnet", "--headless"]).unwrap();
        let mut cfg = core_api::BonnetConfig::default();
        cfg.logging.file = UNWRITABLE_LOG.into();
        // Exits right away, which closes the headless UI.
        cfg.backend.path = "/bin/sh".into();
        cfg.backend.args = vec!["-c".into(), "exit 0".into()];

        let exit = run_app_with_config(&args, cfg, &rt).unwrap();
        assert_eq!(exit, 0);
    }

    #[test]
    fn headless_flag_wins() {
        let args = Args::try_parse_from(["bonnet", "--headless"]).unwrap();
        assert_eq!(ui_kind(&args), UiKind::Headless);
    }
}
