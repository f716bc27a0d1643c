//! 协调器状态转换规则

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatorPhase {
    /// UI and backend (if any) are both live.
    Running,
    /// One side ended; waiting for the other to drain.
    Stopping,
    /// Terminal.
    Stopped,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Invalid transition from {from:?} to {to:?}")]
    InvalidTransition {
        from: CoordinatorPhase,
        to: CoordinatorPhase,
    },
    #[error("Cannot transition from terminal state {state:?}")]
    FromTerminalState { state: CoordinatorPhase },
}

pub struct PhaseTransition;

impl PhaseTransition {
    pub fn validate(from: CoordinatorPhase, to: CoordinatorPhase) -> Result<(), TransitionError> {
        if Self::is_terminal(from) {
            return Err(TransitionError::FromTerminalState { state: from });
        }

        let is_valid = match (from, to) {
            (CoordinatorPhase::Running, CoordinatorPhase::Stopping) => true,
            (CoordinatorPhase::Stopping, CoordinatorPhase::Stopped) => true,
            // 无后端时 UI 关闭即结束
            (CoordinatorPhase::Running, CoordinatorPhase::Stopped) => true,
            _ => false,
        };

        if is_valid {
            Ok(())
        } else {
            Err(TransitionError::InvalidTransition { from, to })
        }
    }

    pub fn is_terminal(phase: CoordinatorPhase) -> bool {
        matches!(phase, CoordinatorPhase::Stopped)
    }
}
