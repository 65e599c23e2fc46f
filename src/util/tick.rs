use web_time::{Duration, Instant};

/// Fixed-period timer for the session tick.
///
/// A late check fires once and schedules the next tick a full period
/// after it, so a stalled event loop never produces a burst of ticks.
pub struct TickTimer {
    interval: Duration,
    next: Instant,
}

impl TickTimer {
    /// Timer whose first tick is one `interval` after `now`.
    pub fn new(interval: Duration, now: Instant) -> Self {
        let interval = interval.max(Duration::from_millis(1));
        Self {
            interval,
            next: now + interval,
        }
    }

    /// Timer with the period given in milliseconds, starting now.
    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis), Instant::now())
    }

    /// When the next tick is due.
    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Tick period.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Consume the tick due at `now`, if any.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
        true
    }
}
