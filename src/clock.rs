use std::time::{Duration, Instant};

/// Numerator of the letter period: `period = PLAYBACK_NUMERATOR / speed`.
/// Higher configured speed means a shorter period and faster letter changes.
pub const PLAYBACK_NUMERATOR: f64 = 2.0;

/// Period of one letter at the given speed. Speed must already be validated
/// at the settings boundary; a non-positive speed here is a configuration bug.
pub fn letter_period(speed: f64) -> Duration {
    debug_assert!(speed > 0.0, "speed must be positive");
    Duration::from_secs_f64(PLAYBACK_NUMERATOR / speed)
}

/// Cancelable repeating timer, polled from the main loop with the current
/// instant. Deadline-based: there is no background thread to race with, and
/// a canceled clock has no deadline left to fire.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalClock {
    deadline: Option<Instant>,
    period: Duration,
}

impl IntervalClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the clock with the first tick due one period from `now`.
    /// Re-arming a running clock replaces its schedule; nothing leaks.
    pub fn start(&mut self, now: Instant, period: Duration) {
        debug_assert!(period > Duration::ZERO, "period must be positive");
        self.period = period;
        self.deadline = Some(now + period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Number of ticks that became due since the last poll, advancing the
    /// deadline past `now`. Returns 0 when canceled.
    pub fn poll(&mut self, now: Instant) -> usize {
        let Some(mut deadline) = self.deadline else {
            return 0;
        };

        let mut fired = 0;
        while deadline <= now {
            fired += 1;
            deadline += self.period;
        }
        self.deadline = Some(deadline);
        fired
    }
}

/// Cancelable one-shot delay. `fire` consumes the deadline, so the timer
/// fires at most once; cancellation clears the deadline synchronously, so a
/// canceled timer can never fire afterwards, even if it was already due.
#[derive(Debug, Clone, Copy, Default)]
pub struct OneShot {
    deadline: Option<Instant>,
}

impl OneShot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules (or reschedules) the timer `delay` from `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once, the first time it is polled at or past the deadline.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
