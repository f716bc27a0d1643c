//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `bonnet_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, BackendConfig, BonnetConfig, LaunchConfig, LoggingConfig,
    WindowConfig,
};
pub use crate::coordinator::{Coordinator, CoordinatorPhase, RunReport, ShutdownSignal, ShutdownTrigger};
pub use crate::error::{ConfigError, LaunchError, SupervisorError, UiError};
pub use crate::launcher::Launcher;
pub use crate::logging::{open_sink, DiscardSink, FileSink, LogSink, Logger, MemorySink};
pub use crate::supervisor::{
    ExitCodeDisplay, ExitOutcome, ProcessLauncher, ProcessSession, StopHandle, Supervisor,
};
pub use crate::ui::{UiLifecycle, UiTerminator};
