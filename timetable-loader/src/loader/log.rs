//! Error and warning log for a run.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// Messages collected over a run, written to a file at the end.
///
/// Warnings are appended once per distinct text; file errors go to the
/// front so the most recent failure is listed first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    messages: Vec<String>,
}

impl ErrorLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message unless the exact same text is already logged.
    ///
    /// Returns true if the message was added.
    pub fn push_unique(&mut self, message: impl Into<String>) -> bool {
        let message = message.into();
        if self.messages.contains(&message) {
            return false;
        }
        self.messages.push(message);
        true
    }

    /// Insert a message at the front of the log.
    pub fn push_front(&mut self, message: impl Into<String>) {
        self.messages.insert(0, message.into());
    }

    /// Returns the messages in log order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Returns the number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns true if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Render the log file content.
    pub fn render(&self, now: NaiveDateTime) -> String {
        let mut out = format!(
            "{}\n{}\n\n{} errors\n\n",
            now.format("%d/%m/%Y"),
            now.format("%H:%M"),
            self.messages.len()
        );
        for message in &self.messages {
            out.push_str(message);
            out.push('\n');
        }
        out
    }

    /// Write the log to `dir/name` if it holds more than one message.
    ///
    /// Returns the path written, or `None` if nothing was written.
    pub fn write_if_needed(
        &self,
        dir: &Path,
        name: &str,
        now: NaiveDateTime,
    ) -> Result<Option<PathBuf>, std::io::Error> {
        if self.messages.len() <= 1 {
            return Ok(None);
        }

        let path = dir.join(name);
        std::fs::write(&path, self.render(now))?;
        Ok(Some(path))
    }
}
