use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::config::LaunchConfig;

/// One spawned OS process. Owned exclusively by the supervisor.
#[async_trait]
pub trait ProcessSession: Send {
    /// `None` once the process has been reaped.
    fn pid(&self) -> Option<u32>;
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    /// Cooperative interrupt (SIGINT or console break). No-op after the process is reaped.
    fn interrupt(&mut self) -> anyhow::Result<()>;
    async fn kill(&mut self) -> anyhow::Result<()>;
    /// Must be cancel safe: dropping the future leaves the process waitable.
    async fn wait(&mut self) -> anyhow::Result<Option<i32>>;
}

#[async_trait]
pub trait ProcessLauncher: Send + Sync {
    fn name(&self) -> &str;
    async fn launch(&self, cfg: &LaunchConfig) -> anyhow::Result<Box<dyn ProcessSession>>;
}
