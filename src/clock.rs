use chrono::{Local, Timelike};
use std::time::Instant;

/// Monotonic millisecond tick source for the stopwatch. Counts from process
/// start and is unaffected by wall-clock adjustments.
pub struct TickSource {
    origin: Instant,
}

impl TickSource {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Local wall-clock time as (hour, minute, second), for display only.
pub fn wall_hms() -> (u32, u32, u32) {
    let now = Local::now();
    (now.hour(), now.minute(), now.second())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_non_decreasing() {
        let ticks = TickSource::new();
        let a = ticks.now_ms();
        let b = ticks.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn wall_hms_is_in_range() {
        let (h, m, s) = wall_hms();
        assert!(h < 24);
        assert!(m < 60);
        assert!(s < 60);
    }
}
