use std::fmt;

/// How the backend ended. Produced exactly once per supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The process ended without being asked.
    AutonomousExit(Option<i32>),
    /// The process ended after the supervisor interrupted it.
    RequestedExit(Option<i32>),
}

impl ExitOutcome {
    pub fn code(&self) -> Option<i32> {
        match self {
            ExitOutcome::AutonomousExit(c) | ExitOutcome::RequestedExit(c) => *c,
        }
    }

    pub fn is_requested(&self) -> bool {
        matches!(self, ExitOutcome::RequestedExit(_))
    }
}

/// Formats an exit code, `unknown` when the OS did not report one.
#[derive(Debug, Clone, Copy)]
pub struct ExitCodeDisplay(pub Option<i32>);

impl fmt::Display for ExitCodeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(code) => write!(f, "{code}"),
            None => f.write_str("unknown"),
        }
    }
}
