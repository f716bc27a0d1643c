use anyhow::{Context, Result};
use async_trait::async_trait;
use bonnet_core::api::{LaunchConfig, ProcessLauncher, ProcessSession};
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};

use super::interrupt;

/// Spawns the backend as a real OS process.
pub struct OsProcessLauncher {}

impl OsProcessLauncher {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for OsProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessLauncher for OsProcessLauncher {
    fn name(&self) -> &str {
        "os"
    }

    async fn launch(&self, cfg: &LaunchConfig) -> Result<Box<dyn ProcessSession>> {
        let mut std_cmd = std::process::Command::new(&cfg.command);
        std_cmd.args(&cfg.args).stdin(Stdio::null());

        if let Some(dir) = cfg.workdir.as_deref() {
            std_cmd.current_dir(dir);
        }

        if cfg.capture_output {
            std_cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else if cfg.show_console {
            std_cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        } else {
            std_cmd.stdout(Stdio::null()).stderr(Stdio::null());
        }

        interrupt::configure(&mut std_cmd, cfg.show_console);

        let mut cmd = Command::from(std_cmd);
        // Reaps the child if the supervisor is dropped without awaiting it.
        cmd.kill_on_drop(true);

        let child = cmd
            .spawn()
            .with_context(|| format!("spawn {}", cfg.command))?;

        Ok(Box::new(OsProcessSession { child }))
    }
}

struct OsProcessSession {
    child: Child,
}

#[async_trait]
impl ProcessSession for OsProcessSession {
    fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stderr
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    fn interrupt(&mut self) -> Result<()> {
        match self.child.id() {
            Some(pid) => interrupt::send_interrupt(pid),
            None => Ok(()),
        }
    }

    async fn kill(&mut self) -> Result<()> {
        self.child.kill().await?;
        Ok(())
    }

    async fn wait(&mut self) -> Result<Option<i32>> {
        let status = self.child.wait().await?;
        Ok(exit_code(status))
    }
}

/// Exit code, or `128 + signal` for a process killed by a signal.
fn exit_code(status: ExitStatus) -> Option<i32> {
    if let Some(code) = status.code() {
        return Some(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status.signal().map(|sig| 128 + sig)
    }
    #[cfg(not(unix))]
    {
        None
    }
}
