use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use bonnet_core::api::LoggingConfig;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Diagnostics go to stderr when `console` is set, otherwise next to the log
/// file as `<file>.trace`. Nothing is installed when logging is disabled.
///
/// Only a bad filter is an error. A trace file that cannot be created is
/// reported on stderr and diagnostics are dropped.
pub fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled && !logging.console {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if !logging.console {
        match trace_appender(&logging.file) {
            Ok(appender) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                let _ = LOG_GUARD.set(guard);
                maybe_writer = Some(non_blocking);
            }
            Err(e) => eprintln!("bonnet: diagnostics disabled: {e}"),
        }
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Opens `<log file>.trace` for appending, creating its directory.
pub fn trace_appender(log_file: &str) -> Result<RollingFileAppender, String> {
    let (dir, file_name) = trace_file(log_file);
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("create log dir {} failed: {e}", dir.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&dir)
        .map_err(|e| format!("open trace file in {} failed: {e}", dir.display()))
}

/// `<dir of log file>`, `<log file name>.trace`
pub fn trace_file(log_file: &str) -> (PathBuf, String) {
    let path = Path::new(log_file.trim());
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "bonnet.log".to_string());
    (dir, format!("{name}.trace"))
}
