use std::time::{Duration, Instant};

/// Stopwatch that starts when it is created.
#[derive(Debug, Clone, Copy)]
pub struct QuickTimer {
    start: Instant,
}

impl QuickTimer {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start = Instant::now();
    }

    /// Time since the last start. The timer keeps running.
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Default for QuickTimer {
    fn default() -> Self {
        Self::new()
    }
}
