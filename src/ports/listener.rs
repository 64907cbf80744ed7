//! Build console port.

/// Line-oriented log attached to one build or polling run.
///
/// This is what a CI user sees for the build, as opposed to the diagnostic
/// `tracing` output of the process.
pub trait TaskListener {
    /// Writes an informational line.
    fn println(&self, line: &str);

    /// Writes a line flagged as a fatal error.
    fn fatal_error(&self, line: &str);
}

/// Forwards bytes written to it to a [`TaskListener`], one line at a time.
///
/// A trailing partial line is emitted when the writer is dropped.
pub struct ListenerWriter<'a> {
    listener: &'a dyn TaskListener,
    pending: Vec<u8>,
}

impl<'a> ListenerWriter<'a> {
    /// Creates a writer over `listener`.
    #[must_use]
    pub fn new(listener: &'a dyn TaskListener) -> Self {
        Self { listener, pending: Vec::new() }
    }

    fn emit(&self, raw: &[u8]) {
        let line = String::from_utf8_lossy(raw);
        self.listener.println(line.trim_end_matches('\r'));
    }
}

impl std::io::Write for ListenerWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(pos) = self.pending.iter().position(|&b| b == b'\n') {
            let rest = self.pending.split_off(pos + 1);
            let line = std::mem::replace(&mut self.pending, rest);
            self.emit(&line[..pos]);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for ListenerWriter<'_> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            let rest = std::mem::take(&mut self.pending);
            self.emit(&rest);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::testing::CapturingListener;

    #[test]
    fn splits_chunks_into_lines() {
        let listener = CapturingListener::default();
        {
            let mut writer = ListenerWriter::new(&listener);
            writer.write_all(b"get: a.txt\r\nget: b").unwrap();
            writer.write_all(b".txt\n3 files").unwrap();
        }
        assert_eq!(listener.lines(), vec!["get: a.txt", "get: b.txt", "3 files"]);
    }
}
