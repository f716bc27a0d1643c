#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bonnet_core::api::{LaunchConfig, ProcessLauncher, ProcessSession, UiError, UiLifecycle, UiTerminator};
use tokio::io::AsyncRead;
use tokio::sync::{mpsc, watch};

/// Shared view of a fake backend process.
pub struct FakeProcess {
    exit_tx: watch::Sender<Option<i32>>,
    pub interrupts: AtomicUsize,
    pub kills: AtomicUsize,
    /// Exit code used when the process honors an interrupt. `None` ignores interrupts.
    honor_interrupt: Option<i32>,
    stdout: Mutex<Option<Vec<u8>>>,
    wait_fails: AtomicBool,
}

impl FakeProcess {
    pub fn new(honor_interrupt: Option<i32>) -> Arc<Self> {
        let (exit_tx, _) = watch::channel(None);
        Arc::new(Self {
            exit_tx,
            interrupts: AtomicUsize::new(0),
            kills: AtomicUsize::new(0),
            honor_interrupt,
            stdout: Mutex::new(None),
            wait_fails: AtomicBool::new(false),
        })
    }

    pub fn with_stdout(self: Arc<Self>, bytes: &[u8]) -> Arc<Self> {
        *self.stdout.lock().unwrap() = Some(bytes.to_vec());
        self
    }

    /// Makes every `wait` on the process fail, as if the OS lost track of it.
    pub fn fail_wait(self: Arc<Self>) -> Arc<Self> {
        self.wait_fails.store(true, Ordering::SeqCst);
        self
    }

    /// Makes the process end on its own.
    pub fn exit(&self, code: i32) {
        self.exit_tx.send_if_modified(|cur| {
            if cur.is_some() {
                return false;
            }
            *cur = Some(code);
            true
        });
    }

    pub fn has_exited(&self) -> bool {
        self.exit_tx.borrow().is_some()
    }

    pub fn interrupt_count(&self) -> usize {
        self.interrupts.load(Ordering::SeqCst)
    }

    pub fn kill_count(&self) -> usize {
        self.kills.load(Ordering::SeqCst)
    }
}

pub struct FakeLauncher {
    process: Arc<FakeProcess>,
    fail: bool,
    pub launches: AtomicUsize,
}

impl FakeLauncher {
    pub fn new(process: Arc<FakeProcess>) -> Self {
        Self {
            process,
            fail: false,
            launches: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            process: FakeProcess::new(Some(0)),
            fail: true,
            launches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ProcessLauncher for FakeLauncher {
    fn name(&self) -> &str {
        "fake"
    }

    async fn launch(&self, cfg: &LaunchConfig) -> anyhow::Result<Box<dyn ProcessSession>> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("no such file: {}", cfg.command);
        }
        Ok(Box::new(FakeSession {
            process: self.process.clone(),
            exit_rx: self.process.exit_tx.subscribe(),
            reaped: false,
        }))
    }
}

struct FakeSession {
    process: Arc<FakeProcess>,
    exit_rx: watch::Receiver<Option<i32>>,
    reaped: bool,
}

#[async_trait]
impl ProcessSession for FakeSession {
    fn pid(&self) -> Option<u32> {
        (!self.reaped).then_some(4242)
    }

    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        let bytes = self.process.stdout.lock().unwrap().take()?;
        Some(Box::new(std::io::Cursor::new(bytes)))
    }

    fn stderr(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        None
    }

    fn interrupt(&mut self) -> anyhow::Result<()> {
        if self.reaped {
            return Ok(());
        }
        self.process.interrupts.fetch_add(1, Ordering::SeqCst);
        if let Some(code) = self.process.honor_interrupt {
            self.process.exit(code);
        }
        Ok(())
    }

    async fn kill(&mut self) -> anyhow::Result<()> {
        self.process.kills.fetch_add(1, Ordering::SeqCst);
        self.process.exit(137);
        Ok(())
    }

    async fn wait(&mut self) -> anyhow::Result<Option<i32>> {
        if self.process.wait_fails.load(Ordering::SeqCst) {
            anyhow::bail!("ECHILD");
        }
        let code = *self
            .exit_rx
            .wait_for(Option::is_some)
            .await
            .map_err(|e| anyhow::anyhow!("wait failed: {e}"))?;
        self.reaped = true;
        Ok(code)
    }
}

/// A UI whose event loop blocks until terminated or closed by the "user".
pub struct ScriptedUi {
    rx: mpsc::UnboundedReceiver<()>,
    terminator: Arc<ScriptedTerminator>,
    close_immediately: bool,
    pub runs: usize,
}

pub struct ScriptedTerminator {
    tx: mpsc::UnboundedSender<()>,
    pub terminations: AtomicUsize,
}

impl ScriptedTerminator {
    pub fn count(&self) -> usize {
        self.terminations.load(Ordering::SeqCst)
    }

    /// Simulates the user closing the window.
    pub fn user_close(&self) {
        let _ = self.tx.send(());
    }
}

impl UiTerminator for ScriptedTerminator {
    fn terminate(&self) {
        self.terminations.fetch_add(1, Ordering::SeqCst);
        let _ = self.tx.send(());
    }
}

impl ScriptedUi {
    /// Blocks in `run` until terminated or `user_close` is called.
    pub fn blocking() -> Self {
        Self::build(false)
    }

    /// Returns from `run` at once, as if the user closed the window immediately.
    pub fn closes_immediately() -> Self {
        Self::build(true)
    }

    fn build(close_immediately: bool) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            rx,
            terminator: Arc::new(ScriptedTerminator {
                tx,
                terminations: AtomicUsize::new(0),
            }),
            close_immediately,
            runs: 0,
        }
    }

    pub fn handle(&self) -> Arc<ScriptedTerminator> {
        self.terminator.clone()
    }
}

impl UiLifecycle for ScriptedUi {
    fn run(&mut self) -> Result<(), UiError> {
        self.runs += 1;
        if self.close_immediately {
            return Ok(());
        }
        self.rx
            .blocking_recv()
            .ok_or_else(|| UiError::EventLoop("ui channel closed".into()))
    }

    fn terminator(&self) -> Arc<dyn UiTerminator> {
        self.terminator.clone()
    }
}

pub fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}
