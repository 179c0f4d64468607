use std::time::Duration;

/// Redraw interval while the stopwatch is idle or holding a snapshot.
pub const REDRAW_DEFAULT: Duration = Duration::from_millis(250);
/// Redraw interval while the stopwatch is accumulating time.
pub const REDRAW_FAST: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Phase {
    #[default]
    Ready,
    Running,
    Stopped,
}

/// Decomposition of a millisecond duration into display fields.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Elapsed {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
    pub millis: u16,
}

impl Elapsed {
    pub fn from_ms(total_ms: u64) -> Self {
        let total_secs = total_ms / 1000;
        Self {
            hours: total_secs / 3600,
            minutes: ((total_secs % 3600) / 60) as u8,
            seconds: (total_secs % 60) as u8,
            millis: (total_ms % 1000) as u16,
        }
    }

    pub fn as_ms(&self) -> u64 {
        ((self.hours * 60 + self.minutes as u64) * 60 + self.seconds as u64) * 1000
            + self.millis as u64
    }
}

/// Stopwatch cycling Ready -> Running -> Stopped -> Ready, driven by a
/// monotonic millisecond tick count. All duration math is done in u64 so a
/// run can outlast the 32-bit wraparound at ~24.8 days.
#[derive(Debug, Default)]
pub struct Stopwatch {
    phase: Phase,
    start_tick: u64,
    elapsed: Elapsed,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn elapsed(&self) -> Elapsed {
        self.elapsed
    }

    /// Transition into `target` unconditionally. Entering Running from a
    /// non-Running phase starts a new run at `now_ms`; a Running -> Running
    /// call only refreshes the elapsed fields and never moves the start
    /// point.
    pub fn advance(&mut self, target: Phase, now_ms: u64) {
        match target {
            Phase::Ready => {
                self.start_tick = 0;
                self.elapsed = Elapsed::default();
            }
            Phase::Running | Phase::Stopped => {
                if target == Phase::Running && self.phase != Phase::Running {
                    self.start_tick = now_ms;
                }
                self.elapsed = Elapsed::from_ms(now_ms.saturating_sub(self.start_tick));
            }
        }
        self.phase = target;
    }

    /// Recompute the elapsed fields while Running. A no-op otherwise.
    pub fn refresh(&mut self, now_ms: u64) {
        if self.phase == Phase::Running {
            self.advance(Phase::Running, now_ms);
        }
    }

    /// The user-facing action: one step along the phase cycle. Returns the
    /// phase that was entered.
    pub fn toggle(&mut self, now_ms: u64) -> Phase {
        let next = match self.phase {
            Phase::Ready => Phase::Running,
            Phase::Running => Phase::Stopped,
            Phase::Stopped => Phase::Ready,
        };
        self.advance(next, now_ms);
        next
    }

    /// How often the display should be refreshed in the current phase.
    pub fn redraw_interval(&self) -> Duration {
        if self.is_running() {
            REDRAW_FAST
        } else {
            REDRAW_DEFAULT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_reconstitute_roundtrip() {
        let samples = [
            0u64,
            1,
            7,
            999,
            1000,
            59_999,
            60_000,
            3_599_999,
            3_600_000,
            86_400_000,
            u32::MAX as u64 + 12_345, // past the original's 32-bit limit
        ];
        for d in samples {
            assert_eq!(Elapsed::from_ms(d).as_ms(), d, "duration {d}");
        }
    }

    #[test]
    fn ready_clears_everything() {
        let mut sw = Stopwatch::new();
        sw.advance(Phase::Running, 4000);
        sw.advance(Phase::Stopped, 9000);
        sw.advance(Phase::Ready, 123_456);
        assert_eq!(sw.phase(), Phase::Ready);
        assert_eq!(sw.elapsed(), Elapsed::default());
    }

    #[test]
    fn running_start_point_is_idempotent() {
        let mut sw = Stopwatch::new();
        sw.advance(Phase::Running, 1000);
        sw.advance(Phase::Running, 2500);
        assert_eq!(sw.elapsed().as_ms(), 1500);
        sw.advance(Phase::Running, 4000);
        assert_eq!(sw.elapsed().as_ms(), 3000);
    }

    #[test]
    fn toggle_cycle_length_is_three() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.toggle(100), Phase::Running);
        assert_eq!(sw.toggle(200), Phase::Stopped);
        assert_eq!(sw.toggle(300), Phase::Ready);
        assert_eq!(sw.phase(), Phase::Ready);
        assert_eq!(sw.elapsed(), Elapsed::default());
    }

    #[test]
    fn stop_freezes_the_snapshot() {
        let mut sw = Stopwatch::new();
        sw.advance(Phase::Running, 1000);
        assert_eq!(sw.elapsed().as_ms(), 0);
        sw.refresh(5000);
        assert_eq!(sw.elapsed().as_ms(), 4000);
        sw.advance(Phase::Stopped, 5000);
        assert_eq!(sw.elapsed().as_ms(), 4000);
        sw.refresh(8000); // frozen while stopped
        assert_eq!(sw.elapsed().as_ms(), 4000);
        // re-entering Running starts a fresh run
        sw.advance(Phase::Running, 9000);
        assert_eq!(sw.elapsed().as_ms(), 0);
    }

    #[test]
    fn ticks_before_start_saturate_to_zero() {
        let mut sw = Stopwatch::new();
        sw.advance(Phase::Running, 5000);
        sw.refresh(4000);
        assert_eq!(sw.elapsed().as_ms(), 0);
    }

    #[test]
    fn redraw_interval_follows_phase() {
        let mut sw = Stopwatch::new();
        assert_eq!(sw.redraw_interval(), REDRAW_DEFAULT);
        sw.toggle(0);
        assert_eq!(sw.redraw_interval(), REDRAW_FAST);
        sw.toggle(10);
        assert_eq!(sw.redraw_interval(), REDRAW_DEFAULT);
    }
}
