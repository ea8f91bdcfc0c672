//! Progress reporting.

use std::time::Duration;

use tracing::info;

/// Receives progress notifications as trip files are processed.
///
/// Notifications are one-way; nothing reported here affects the run.
pub trait Progress {
    /// Called once before the first file, with the number of files.
    fn start(&mut self, total: usize);

    /// Called after each file with its zero-based index and duration.
    fn step(&mut self, index: usize, elapsed: Duration);

    /// Called once after the last file.
    fn finish(&mut self);
}

/// Progress reporter that emits `tracing` events.
#[derive(Debug, Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
}

impl LogProgress {
    /// Create a new reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Status text for the most recent step.
    pub fn status(&self) -> String {
        format!("{} of {} complete", self.done, self.total)
    }

    /// Fraction of files processed, from 0 to 100.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 100;
        }
        (self.done * 100 / self.total) as u32
    }
}

impl Progress for LogProgress {
    fn start(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
        info!(files = total, "loading bus timetables");
    }

    fn step(&mut self, index: usize, elapsed: Duration) {
        self.done = index + 1;
        info!(
            percent = self.percent(),
            elapsed_ms = elapsed.as_millis() as u64,
            "{}",
            self.status()
        );
    }

    fn finish(&mut self) {
        info!(files = self.done, "finished loading bus timetables");
    }
}
