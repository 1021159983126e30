use std::borrow::Cow;
use std::io::{self, Write};
use tracing::Level;

use crate::utils::constants::CAPTURE_TARGET;

/// Stands in for a file or stream and sends what is written to `tracing`.
///
/// Data often arrives in partial or multiple lines, so bytes are queued until a
/// newline shows up and each complete line becomes its own event. Lines are
/// decoded only once complete, so a character split across writes survives.
pub struct LineLogWriter {
    name: String,
    level: Level,
    queued: Vec<u8>,
}

impl LineLogWriter {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_level(name, Level::DEBUG)
    }

    pub fn with_level(name: impl Into<String>, level: Level) -> Self {
        Self {
            name: name.into(),
            level,
            queued: Vec::new(),
        }
    }

    /// Text received since the last newline.
    pub fn pending(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.queued)
    }

    fn emit(&self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        let line = text.trim_end_matches(['\n', '\r']);
        let source = self.name.as_str();
        if self.level == Level::ERROR {
            tracing::error!(target: CAPTURE_TARGET, source, "{}", line);
        } else if self.level == Level::WARN {
            tracing::warn!(target: CAPTURE_TARGET, source, "{}", line);
        } else if self.level == Level::INFO {
            tracing::info!(target: CAPTURE_TARGET, source, "{}", line);
        } else if self.level == Level::DEBUG {
            tracing::debug!(target: CAPTURE_TARGET, source, "{}", line);
        } else {
            tracing::trace!(target: CAPTURE_TARGET, source, "{}", line);
        }
    }
}

impl Write for LineLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.queued.extend_from_slice(buf);

        while let Some(pos) = self.queued.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.queued.drain(..=pos).collect();
            self.emit(&line);
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for LineLogWriter {
    fn drop(&mut self) {
        if !self.queued.is_empty() {
            let rest = std::mem::take(&mut self.queued);
            self.emit(&rest);
        }
    }
}
