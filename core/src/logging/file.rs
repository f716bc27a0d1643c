use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::format_bonnet_line;
use super::sink::LogSink;

/// Append-only log file. One lock per instance; every call is a single
/// locked write followed by a flush, so lines from the watcher and the UI
/// thread never tear.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, bytes: &[u8]) {
        let mut file = match self.file.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = file.write_all(bytes).and_then(|_| file.flush()) {
            tracing::warn!(error.kind = "log.write_failed", path = %self.path.display(), error = %e);
        }
    }
}

impl LogSink for FileSink {
    fn log_from_process(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        self.write(bytes);
    }

    fn log_from_bonnet(&self, message: &str) {
        self.write(format_bonnet_line(message).as_bytes());
    }
}
