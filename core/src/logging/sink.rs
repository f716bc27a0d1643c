use std::sync::Mutex;

use super::format_bonnet_line;

pub trait LogSink: Send + Sync {
    /// Raw backend output, written as-is.
    fn log_from_process(&self, bytes: &[u8]);

    /// A status line from bonnet itself.
    fn log_from_bonnet(&self, message: &str);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl LogSink for DiscardSink {
    fn log_from_process(&self, _bytes: &[u8]) {}

    fn log_from_bonnet(&self, _message: &str) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Process(Vec<u8>),
    Bonnet(String),
}

/// Keeps every write in memory, in write order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(g) => g.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn bonnet_lines(&self) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Bonnet(m) => Some(m),
                LogEntry::Process(_) => None,
            })
            .collect()
    }

    pub fn process_bytes(&self) -> Vec<u8> {
        self.entries()
            .into_iter()
            .filter_map(|e| match e {
                LogEntry::Process(b) => Some(b),
                LogEntry::Bonnet(_) => None,
            })
            .flatten()
            .collect()
    }

    /// The bytes a file sink would hold after the same writes.
    pub fn render(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in self.entries() {
            match entry {
                LogEntry::Process(b) => out.extend_from_slice(&b),
                LogEntry::Bonnet(m) => out.extend_from_slice(format_bonnet_line(&m).as_bytes()),
            }
        }
        out
    }

    fn push(&self, entry: LogEntry) {
        match self.entries.lock() {
            Ok(mut g) => g.push(entry),
            Err(poisoned) => poisoned.into_inner().push(entry),
        }
    }
}

impl LogSink for MemorySink {
    fn log_from_process(&self, bytes: &[u8]) {
        self.push(LogEntry::Process(bytes.to_vec()));
    }

    fn log_from_bonnet(&self, message: &str) {
        self.push(LogEntry::Bonnet(message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn memory_sink_renders_in_write_order() {
        let sink = MemorySink::new();
        sink.log_from_process(b"abc");
        sink.log_from_bonnet("config: url=https://x");
        sink.log_from_process(b"def\n");

        assert_eq!(
            String::from_utf8(sink.render()).unwrap(),
            "abc[bonnet] config: url=https://x\ndef\n"
        );
        assert_eq!(sink.bonnet_lines(), vec!["config: url=https://x"]);
        assert_eq!(sink.process_bytes(), b"abcdef\n".to_vec());
    }
}
