use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::LaunchConfig;
use crate::error::SupervisorError;
use crate::logging::Logger;

use super::io_pump;
use super::stop::{stop_pair, StopHandle, StopToken};
use super::traits::{ProcessLauncher, ProcessSession};
use super::types::{ExitCodeDisplay, ExitOutcome};

/// Owns one backend process from spawn until it is reaped.
pub struct Supervisor {
    session: Box<dyn ProcessSession>,
    command: String,
    pid: Option<u32>,
    sink: Logger,
    pumps: Vec<JoinHandle<Result<u64, SupervisorError>>>,
    stop: StopHandle,
    stop_token: StopToken,
    stop_grace: Option<Duration>,
}

impl Supervisor {
    /// Spawns the backend. Must run inside a tokio runtime: captured output is
    /// pumped to `sink` by background tasks.
    pub async fn start(
        launcher: &dyn ProcessLauncher,
        cfg: &LaunchConfig,
        sink: Logger,
    ) -> Result<Self, SupervisorError> {
        let mut session = launcher
            .launch(cfg)
            .await
            .map_err(|source| SupervisorError::Start {
                cmd: cfg.command.clone(),
                source,
            })?;

        let pid = session.pid();
        let mut pumps = Vec::with_capacity(2);
        if cfg.capture_output {
            if let Some(stdout) = session.stdout() {
                pumps.push(io_pump::pump_stdout(stdout, sink.clone()));
            }
            if let Some(stderr) = session.stderr() {
                pumps.push(io_pump::pump_stderr(stderr, sink.clone()));
            }
        }

        tracing::info!(
            launcher = launcher.name(),
            cmd = %cfg.command,
            pid = ?pid,
            capture = cfg.capture_output,
            "backend started"
        );

        let (stop, stop_token) = stop_pair();
        Ok(Self {
            session,
            command: cfg.command.clone(),
            pid,
            sink,
            pumps,
            stop,
            stop_token,
            stop_grace: cfg.stop_grace_ms.map(Duration::from_millis),
        })
    }

    pub fn pid(&self) -> Option<u32> {
        self.pid
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Runs until the process ends on its own or a stop is requested through
    /// [`Supervisor::stop_handle`]. On stop the process gets one cooperative
    /// interrupt and is then waited for, with no timeout unless a grace period
    /// was configured.
    pub async fn await_exit(self) -> ExitOutcome {
        let Supervisor {
            mut session,
            command,
            pid,
            sink,
            pumps,
            stop: _stop,
            mut stop_token,
            stop_grace,
        } = self;

        let first = {
            let wait_fut = session.wait();
            tokio::pin!(wait_fut);
            tokio::select! {
                biased;
                res = &mut wait_fut => Some(res),
                _ = stop_token.stopped() => None,
            }
        };

        let outcome = match first {
            Some(res) => match res {
                Ok(code) => ExitOutcome::AutonomousExit(code),
                Err(e) => wait_failed(&sink, e),
            },
            None => {
                tracing::info!(cmd = %command, pid = ?pid, "interrupting backend");
                if let Err(e) = session.interrupt() {
                    tracing::warn!(error.kind = "backend.interrupt_failed", error = %e);
                    sink.log_from_bonnet(&format!("failed to interrupt backend: {e}"));
                }
                match wait_after_interrupt(session.as_mut(), stop_grace, &sink).await {
                    Ok(code) => ExitOutcome::RequestedExit(code),
                    Err(e) => wait_failed(&sink, e),
                }
            }
        };

        io_pump::drain(pumps).await;

        tracing::info!(
            cmd = %command,
            exit_code = %ExitCodeDisplay(outcome.code()),
            requested = outcome.is_requested(),
            "backend reaped"
        );
        outcome
    }
}

async fn wait_after_interrupt(
    session: &mut dyn ProcessSession,
    stop_grace: Option<Duration>,
    sink: &Logger,
) -> anyhow::Result<Option<i32>> {
    let Some(grace) = stop_grace else {
        return session.wait().await;
    };

    match tokio::time::timeout(grace, session.wait()).await {
        Ok(res) => res,
        Err(_) => {
            tracing::warn!(
                grace_ms = grace.as_millis() as u64,
                "backend ignored interrupt, killing"
            );
            sink.log_from_bonnet(&format!(
                "backend did not stop within {}ms, killing",
                grace.as_millis()
            ));
            if let Err(e) = session.kill().await {
                tracing::warn!(error.kind = "backend.kill_failed", error = %e);
            }
            session.wait().await
        }
    }
}

fn wait_failed(sink: &Logger, e: anyhow::Error) -> ExitOutcome {
    let err = SupervisorError::Wait(e);
    tracing::error!(error.kind = "backend.wait_failed", error = %err);
    sink.log_from_bonnet(&err.to_string());
    ExitOutcome::AutonomousExit(None)
}
