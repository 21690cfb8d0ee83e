//! Poll interval gate on the free-running millisecond counter.

/// Minimum time between two sensor read attempts.
pub const SENSOR_DELAY: u32 = 2000; // 2000ms, the DHT11 cannot sample faster

/// Millisecond gate deciding when the sensor may be polled again.
///
/// Time is a free-running millisecond counter that wraps like an unsigned
/// 32 bit value, so elapsed time is taken with wrapping subtraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalTimer {
    interval_ms: u32,
    last_ms: u32,
}

impl IntervalTimer {
    /// Gate with the last trigger at boot (t = 0), so the first poll
    /// happens one full interval after power-up.
    pub const fn new(interval_ms: u32) -> IntervalTimer {
        Self {
            interval_ms,
            last_ms: 0,
        }
    }

    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_ms)
    }

    pub fn is_due(&self, now_ms: u32) -> bool {
        self.elapsed(now_ms) >= self.interval_ms
    }

    /// Record a trigger at `now_ms`.
    pub fn reset(&mut self, now_ms: u32) {
        self.last_ms = now_ms;
    }

    pub fn last(&self) -> u32 {
        self.last_ms
    }
}

impl Default for IntervalTimer {
    fn default() -> Self {
        Self::new(SENSOR_DELAY)
    }
}
