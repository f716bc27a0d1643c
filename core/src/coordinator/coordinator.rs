use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;

use crate::logging::Logger;
use crate::supervisor::{ExitCodeDisplay, ExitOutcome, Supervisor};
use crate::ui::{UiLifecycle, UiTerminator};

use super::signal::{ShutdownSignal, ShutdownTrigger};
use super::transitions::{CoordinatorPhase, PhaseTransition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub trigger: Option<ShutdownTrigger>,
    pub outcome: Option<ExitOutcome>,
}

/// Links the UI lifecycle to the backend lifecycle: whichever ends first
/// takes the other down, exactly once.
pub struct Coordinator {
    sink: Logger,
    signal: ShutdownSignal,
    phase: Arc<Mutex<CoordinatorPhase>>,
}

impl Coordinator {
    pub fn new(sink: Logger) -> Self {
        Self {
            sink,
            signal: ShutdownSignal::new(),
            phase: Arc::new(Mutex::new(CoordinatorPhase::Running)),
        }
    }

    pub fn signal(&self) -> ShutdownSignal {
        self.signal.clone()
    }

    pub fn phase(&self) -> CoordinatorPhase {
        read_phase(&self.phase)
    }

    /// Runs the UI on the calling thread and watches the backend on `rt`.
    /// Returns after the UI loop has returned and the backend is reaped.
    /// Must not be called from inside an async context.
    pub fn run(
        &self,
        ui: &mut dyn UiLifecycle,
        supervisor: Option<Supervisor>,
        rt: &Handle,
    ) -> RunReport {
        let watcher = supervisor.map(|sup| {
            let stop = sup.stop_handle();
            let task = rt.spawn(watch_backend(
                sup,
                self.signal.clone(),
                ui.terminator(),
                self.sink.clone(),
                self.phase.clone(),
            ));
            (stop, task)
        });

        if let Err(e) = ui.run() {
            tracing::error!(error.kind = "ui.event_loop", error = %e);
            self.sink.log_from_bonnet(&e.to_string());
        }

        let Some((stop, task)) = watcher else {
            self.signal.fire(ShutdownTrigger::UiClosed);
            advance(&self.phase, CoordinatorPhase::Stopped);
            return RunReport {
                trigger: self.signal.trigger(),
                outcome: None,
            };
        };

        if self.signal.fire(ShutdownTrigger::UiClosed) {
            advance(&self.phase, CoordinatorPhase::Stopping);
            tracing::info!("graceful shutdown requested");
            self.sink.log_from_bonnet("graceful shutdown requested");
            stop.request_stop();
        }

        let outcome = match rt.block_on(task) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                tracing::error!(error.kind = "backend.watcher_failed", error = %e);
                self.sink
                    .log_from_bonnet(&format!("backend watcher failed: {e}"));
                None
            }
        };

        if let Some(ExitOutcome::RequestedExit(code)) = outcome {
            tracing::info!(exit_code = %ExitCodeDisplay(code), "backend exited on request");
            self.sink.log_from_bonnet(&format!(
                "backend exited on request, exit code={}",
                ExitCodeDisplay(code)
            ));
        }

        advance(&self.phase, CoordinatorPhase::Stopped);
        RunReport {
            trigger: self.signal.trigger(),
            outcome,
        }
    }
}

async fn watch_backend(
    supervisor: Supervisor,
    signal: ShutdownSignal,
    terminator: Arc<dyn UiTerminator>,
    sink: Logger,
    phase: Arc<Mutex<CoordinatorPhase>>,
) -> ExitOutcome {
    let outcome = supervisor.await_exit().await;

    if let ExitOutcome::AutonomousExit(code) = outcome {
        if signal.fire(ShutdownTrigger::BackendExited) {
            advance(&phase, CoordinatorPhase::Stopping);
            tracing::warn!(exit_code = %ExitCodeDisplay(code), "backend exited autonomously");
            sink.log_from_bonnet(&format!(
                "backend exited autonomously, exit code={}",
                ExitCodeDisplay(code)
            ));
            terminator.terminate();
        }
    }

    outcome
}

fn read_phase(phase: &Mutex<CoordinatorPhase>) -> CoordinatorPhase {
    match phase.lock() {
        Ok(g) => *g,
        Err(poisoned) => *poisoned.into_inner(),
    }
}

fn advance(phase: &Mutex<CoordinatorPhase>, to: CoordinatorPhase) {
    let mut g = match phase.lock() {
        Ok(g) => g,
        Err(poisoned) => poisoned.into_inner(),
    };
    match PhaseTransition::validate(*g, to) {
        Ok(()) => {
            tracing::debug!(from = ?*g, to = ?to, "coordinator phase");
            *g = to;
        }
        Err(e) => tracing::debug!(error = %e, "ignored phase transition"),
    }
}
