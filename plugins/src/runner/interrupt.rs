//! Cooperative interrupt, per platform.

use anyhow::Result;
use std::process::Command;

/// Puts the child in its own process group so the interrupt reaches only the
/// backend, and a terminal Ctrl-C reaches only bonnet.
#[cfg(unix)]
pub fn configure(cmd: &mut Command, _show_console: bool) {
    use std::os::unix::process::CommandExt;

    cmd.process_group(0);
}

#[cfg(windows)]
pub fn configure(cmd: &mut Command, show_console: bool) {
    use std::os::windows::process::CommandExt;
    use windows::Win32::System::Threading::{
        CREATE_NEW_CONSOLE, CREATE_NEW_PROCESS_GROUP, CREATE_NO_WINDOW,
    };

    let console = if show_console {
        CREATE_NEW_CONSOLE
    } else {
        CREATE_NO_WINDOW
    };
    cmd.creation_flags(CREATE_NEW_PROCESS_GROUP.0 | console.0);
}

#[cfg(not(any(unix, windows)))]
pub fn configure(_cmd: &mut Command, _show_console: bool) {}

#[cfg(unix)]
pub fn send_interrupt(pid: u32) -> Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let pid = i32::try_from(pid)?;
    match kill(Pid::from_raw(pid), Signal::SIGINT) {
        Ok(()) => Ok(()),
        // Already gone between the pid lookup and the signal.
        Err(nix::errno::Errno::ESRCH) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(windows)]
pub fn send_interrupt(pid: u32) -> Result<()> {
    use windows::Win32::System::Console::{GenerateConsoleCtrlEvent, CTRL_BREAK_EVENT};

    // The child leads its own process group, so its pid is the group id.
    unsafe { GenerateConsoleCtrlEvent(CTRL_BREAK_EVENT, pid)? };
    Ok(())
}

#[cfg(not(any(unix, windows)))]
pub fn send_interrupt(_pid: u32) -> Result<()> {
    anyhow::bail!("cooperative interrupt is not supported on this platform")
}
