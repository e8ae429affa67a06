//! Fixed-delay rate limiting between consecutive requests.

use std::time::{Duration, Instant};

/// Enforces a minimum gap between the start of consecutive requests.
#[derive(Debug, Clone)]
pub struct Throttle {
    delay: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(delay: Duration) -> Self {
        Self { delay, last: None }
    }

    /// Time still to wait before the next request may start.
    pub fn remaining(&self) -> Duration {
        match self.last {
            Some(last) => self.delay.saturating_sub(last.elapsed()),
            None => Duration::ZERO,
        }
    }

    /// Sleeps until the next request may start, then marks it as started.
    pub fn wait(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last = Some(Instant::now());
    }
}
