use std::time::{Duration, Instant};

/// Wall-clock delta source with a stall guard.
#[derive(Debug, Clone)]
pub struct TickClock {
    last: Instant,
    stall_limit: Duration,
}

impl TickClock {
    /// Default stall limit: 200 ms. Anything longer is treated as a stall
    /// (tab backgrounded, debugger break) and skipped instead of simulated.
    pub fn new() -> Self {
        Self::with_stall_limit(Duration::from_millis(200))
    }

    pub fn with_stall_limit(stall_limit: Duration) -> Self {
        Self {
            last: Instant::now(),
            stall_limit,
        }
    }

    /// Resets the baseline. Called when the runtime (re)starts so the first
    /// frame after a pause does not observe the pause as elapsed time.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns the delta in seconds, or `None` when the
    /// delta exceeded the stall limit. The baseline advances either way: after a
    /// stall the next tick measures from now, not from before the stall.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> Option<f32> {
        let dt = now.saturating_duration_since(self.last);
        self.last = now;

        if dt > self.stall_limit {
            None
        } else {
            Some(dt.as_secs_f32())
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_delta_is_reported() {
        let mut clock = TickClock::new();
        let start = Instant::now();
        clock.last = start;

        let dt = clock.tick_at(start + Duration::from_millis(16)).unwrap();
        assert!((dt - 0.016).abs() < 1e-4);
    }

    #[test]
    fn stall_is_skipped_but_clock_advances() {
        let mut clock = TickClock::new();
        let start = Instant::now();
        clock.last = start;

        // 300 ms > 200 ms limit: skipped.
        let stalled = start + Duration::from_millis(300);
        assert!(clock.tick_at(stalled).is_none());

        // The baseline moved to the stall point, so the next frame is normal.
        let dt = clock.tick_at(stalled + Duration::from_millis(16)).unwrap();
        assert!((dt - 0.016).abs() < 1e-4);
    }

    #[test]
    fn limit_is_inclusive() {
        let mut clock = TickClock::new();
        let start = Instant::now();
        clock.last = start;

        // Exactly at the limit still counts as a normal frame.
        assert!(clock.tick_at(start + Duration::from_millis(200)).is_some());
    }
}
