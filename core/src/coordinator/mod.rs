//! # 关停协调
//!
//! 竞争两个事件：UI 关闭与后端自行退出。先到者触发另一侧的终止，且只触发一次。

#[allow(clippy::module_inception)]
mod coordinator;
mod signal;
mod transitions;

pub use coordinator::{Coordinator, RunReport};
pub use signal::{ShutdownSignal, ShutdownTrigger};
pub use transitions::{CoordinatorPhase, PhaseTransition, TransitionError};
