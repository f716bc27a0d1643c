mod io_pump;
mod stop;
#[allow(clippy::module_inception)]
mod supervisor;
mod traits;
mod types;

pub use io_pump::DRAIN_TIMEOUT;
pub use stop::{stop_pair, StopHandle, StopToken};
pub use supervisor::Supervisor;
pub use traits::{ProcessLauncher, ProcessSession};
pub use types::{ExitCodeDisplay, ExitOutcome};
