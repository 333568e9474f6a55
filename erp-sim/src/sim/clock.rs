//! Virtual clock
//!
//! The simulation's own notion of "now", advanced in fixed-size steps
//! independent of wall-clock time. Monotonically increasing.

use shared::util::days_to_millis;

#[derive(Debug, Clone)]
pub struct VirtualClock {
    now: i64,
    step_days: f64,
    step_millis: i64,
}

impl VirtualClock {
    /// Create a clock at `start` (Unix millis) advancing `step_days`
    /// simulated days per step.
    pub fn new(start: i64, step_days: f64) -> Self {
        Self {
            now: start,
            step_days,
            step_millis: days_to_millis(step_days),
        }
    }

    /// Current simulated timestamp (Unix millis)
    pub fn now(&self) -> i64 {
        self.now
    }

    /// Simulated days elapsed per step
    pub fn step_days(&self) -> f64 {
        self.step_days
    }

    /// Timestamp the next step will land on
    pub fn peek_next(&self) -> i64 {
        self.now + self.step_millis
    }

    /// Advance one step, returning the new simulated timestamp
    pub fn advance(&mut self) -> i64 {
        self.now += self.step_millis;
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::util::MILLIS_PER_DAY;

    #[test]
    fn advances_in_fixed_steps() {
        let mut clock = VirtualClock::new(0, 7.0);
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.peek_next(), 7 * MILLIS_PER_DAY);
        assert_eq!(clock.advance(), 7 * MILLIS_PER_DAY);
        assert_eq!(clock.advance(), 14 * MILLIS_PER_DAY);
        assert_eq!(clock.now(), 14 * MILLIS_PER_DAY);
    }

    #[test]
    fn never_goes_backward() {
        let mut clock = VirtualClock::new(1_000, 0.5);
        let mut prev = clock.now();
        for _ in 0..100 {
            let next = clock.advance();
            assert!(next > prev);
            prev = next;
        }
    }
}
