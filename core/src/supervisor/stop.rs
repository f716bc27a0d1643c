use std::sync::Arc;

use tokio::sync::watch;

/// Creates the cancel pair used to interrupt [`super::Supervisor::await_exit`].
pub fn stop_pair() -> (StopHandle, StopToken) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx: Arc::new(tx) }, StopToken { rx })
}

/// Requests a graceful stop. Cloneable; every clone fires the same token.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    /// Returns `true` only for the call that actually flipped the token.
    pub fn request_stop(&self) -> bool {
        self.tx.send_if_modified(|requested| {
            if *requested {
                false
            } else {
                *requested = true;
                true
            }
        })
    }

    pub fn is_requested(&self) -> bool {
        *self.tx.borrow()
    }
}

#[derive(Debug, Clone)]
pub struct StopToken {
    rx: watch::Receiver<bool>,
}

impl StopToken {
    /// Resolves once a stop was requested. Pends forever if every handle is gone.
    pub async fn stopped(&mut self) {
        if self.rx.wait_for(|requested| *requested).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn only_first_request_counts() {
        let (handle, _token) = stop_pair();
        let other = handle.clone();
        assert!(!handle.is_requested());
        assert!(handle.request_stop());
        assert!(!other.request_stop());
        assert!(!handle.request_stop());
        assert!(other.is_requested());
    }

    #[tokio::test]
    async fn token_resolves_after_request() {
        let (handle, mut token) = stop_pair();
        let waiter = tokio::spawn(async move { token.stopped().await });
        handle.request_stop();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("token should resolve")
            .unwrap();
    }

    #[tokio::test]
    async fn dropped_handle_never_resolves() {
        let (handle, mut token) = stop_pair();
        drop(handle);
        let res = tokio::time::timeout(Duration::from_millis(50), token.stopped()).await;
        assert!(res.is_err());
    }
}
