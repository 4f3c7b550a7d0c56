//! Writing the same bytes to several sinks.

use std::io::{self, Write};

/// A writer that mirrors every write to all of its sinks.
///
/// Each call to [`Write::write`] is forwarded with `write_all` to every sink in
/// order, so either the whole buffer reaches every sink or the call fails.
/// A failing sink fails the call; sinks after it do not see the buffer.
pub struct FanOutWriter<W: Write> {
    sinks: Vec<W>,
}

impl<W: Write> FanOutWriter<W> {
    /// Create a new fan-out writer.
    pub fn new(sinks: Vec<W>) -> Self {
        Self { sinks }
    }

    /// Get the number of sinks.
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    /// Check if there are no sinks.
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Hand back the sinks, in the order they were given.
    pub fn into_inner(self) -> Vec<W> {
        self.sinks
    }
}

impl<W: Write> Write for FanOutWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for sink in &mut self.sinks {
            sink.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.flush()?;
        }
        Ok(())
    }
}
