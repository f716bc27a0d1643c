#![cfg(unix)]

// Raises SIGINT on the whole test process, so it lives in its own binary.

use std::sync::Arc;
use std::time::{Duration, Instant};

use bonnet_core::api::{
    Coordinator, ExitOutcome, LaunchConfig, MemorySink, ShutdownTrigger, Supervisor, WindowConfig,
};
use bonnet_plugins::factory::{build_ui, UiKind};
use bonnet_plugins::runner::OsProcessLauncher;
use nix::sys::signal::{raise, Signal};
use pretty_assertions::assert_eq;

#[test]
fn ctrl_c_closes_the_ui_and_stops_the_backend() {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap();
    let sink = Arc::new(MemorySink::new());
    let cfg = LaunchConfig::new("/bin/sleep").with_args(["5"]);
    let sup = rt
        .block_on(Supervisor::start(&OsProcessLauncher::new(), &cfg, sink.clone()))
        .unwrap();

    let mut ui = build_ui(UiKind::Headless, &WindowConfig::default(), rt.handle()).unwrap();

    // The handler is installed by the time build_ui returns.
    raise(Signal::SIGINT).unwrap();

    let started = Instant::now();
    let report = Coordinator::new(sink.clone()).run(ui.as_mut(), Some(sup), rt.handle());

    assert!(started.elapsed() < Duration::from_secs(4));
    assert_eq!(report.trigger, Some(ShutdownTrigger::UiClosed));
    assert_eq!(report.outcome, Some(ExitOutcome::RequestedExit(Some(130))));
    assert!(sink
        .bonnet_lines()
        .contains(&"graceful shutdown requested".to_string()));
}
