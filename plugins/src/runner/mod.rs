mod interrupt;
pub mod process;

pub use process::OsProcessLauncher;
