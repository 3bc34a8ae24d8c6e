//! Output sinks.
//!
//! A sink is any `Write + Send` destination plus the caller's answer to "is this
//! an interactive terminal?". Each rendered line goes out in one `write_all`
//! under the sink's lock, so concurrent loggers never interleave partial lines.

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

pub struct Output {
    writer: Mutex<Box<dyn Write + Send>>,
    terminal: bool,
}

impl Output {
    pub fn new<W: Write + Send + 'static>(writer: W, terminal: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            terminal,
        }
    }

    pub fn stderr() -> Self {
        let terminal = io::stderr().is_terminal();
        Self::new(io::stderr(), terminal)
    }

    pub fn stdout() -> Self {
        let terminal = io::stdout().is_terminal();
        Self::new(io::stdout(), terminal)
    }

    /// Append to `path`, creating it if needed. Files never count as terminals.
    pub fn append_file(path: &Path) -> io::Result<Self> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(f, false))
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Best effort: write errors are dropped.
    pub(crate) fn write_line(&self, line: &str) {
        let mut w = self.writer.lock();
        let _ = w.write_all(line.as_bytes());
        let _ = w.flush();
    }
}

impl fmt::Debug for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Output")
            .field("terminal", &self.terminal)
            .finish_non_exhaustive()
    }
}

/// In-memory sink. Clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a clone of this sink as an [`Output`].
    pub fn output(&self, terminal: bool) -> Output {
        Output::new(self.clone(), terminal)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        self.buf.lock().clear();
    }
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn memory_sink_collects_lines() {
        let sink = MemorySink::new();
        let out = sink.output(false);
        out.write_line("one\n");
        out.write_line("two\n");
        assert_eq!(sink.lines(), ["one", "two"]);
        sink.clear();
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn write_errors_are_swallowed() {
        let out = Output::new(Broken, true);
        out.write_line("lost\n");
        assert!(out.is_terminal());
    }

    #[test]
    fn append_file_keeps_existing_content() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("app.log");
        std::fs::write(&path, "old\n").expect("seed file");

        let out = Output::append_file(&path).expect("open sink");
        assert!(!out.is_terminal());
        out.write_line("new\n");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }
}
