use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;

use crate::error::SupervisorError;
use crate::logging::Logger;

/// How long to keep draining pipes after the process is reaped. A grandchild
/// holding the pipe open must not block shutdown.
pub const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

pub fn pump_stdout<R>(rd: R, sink: Logger) -> JoinHandle<Result<u64, SupervisorError>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    pump(rd, sink, "stdout")
}

pub fn pump_stderr<R>(rd: R, sink: Logger) -> JoinHandle<Result<u64, SupervisorError>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    pump(rd, sink, "stderr")
}

fn pump<R>(mut rd: R, sink: Logger, label: &'static str) -> JoinHandle<Result<u64, SupervisorError>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;

        loop {
            let n = rd
                .read(&mut buf)
                .await
                .map_err(|e| SupervisorError::StreamIo {
                    stream: label,
                    source: e,
                })?;
            if n == 0 {
                break;
            }
            sink.log_from_process(&buf[..n]);
            total += n as u64;
        }

        Ok(total)
    })
}

/// Waits for the pumps to hit EOF, aborting any still running after [`DRAIN_TIMEOUT`].
pub async fn drain(pumps: Vec<JoinHandle<Result<u64, SupervisorError>>>) {
    for mut task in pumps {
        match tokio::time::timeout(DRAIN_TIMEOUT, &mut task).await {
            Ok(Ok(Ok(bytes))) => tracing::debug!(bytes, "output pump finished"),
            Ok(Ok(Err(e))) => tracing::warn!(error.kind = "backend.stream_io", error = %e),
            Ok(Err(e)) => tracing::warn!(error.kind = "backend.pump_panicked", error = %e),
            Err(_) => {
                tracing::debug!("output pump still open after exit, aborting");
                task.abort();
            }
        }
    }
}
