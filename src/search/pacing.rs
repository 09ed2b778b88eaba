use std::time::{Duration, Instant};

/// Converts wall-clock time into a number of search steps. Steps that were due while
/// the host was busy are all handed out on the next tick, and the part of an interval
/// that has not fully elapsed carries over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PacingTimer {
    prev: Instant,
}

impl PacingTimer {
    pub fn new(now: Instant) -> PacingTimer {
        PacingTimer { prev: now }
    }

    /// `interval` must be non-zero.
    pub fn due_steps(&mut self, now: Instant, interval: Duration) -> usize {
        debug_assert!(!interval.is_zero());
        let elapsed = now.saturating_duration_since(self.prev);
        let steps = elapsed.as_nanos() / interval.as_nanos();
        self.prev += Duration::from_nanos((steps * interval.as_nanos()) as u64);
        steps as usize
    }

    pub fn next_tick(&self, interval: Duration) -> Option<Instant> {
        self.prev.checked_add(interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catches_up_and_carries_remainder() {
        let start = Instant::now();
        let interval = Duration::from_millis(20);
        let mut timer = PacingTimer::new(start);
        assert_eq!(timer.due_steps(start + Duration::from_millis(10), interval), 0);
        assert_eq!(timer.due_steps(start + Duration::from_millis(25), interval), 1);
        // 5ms were left over, so 15ms more completes another interval.
        assert_eq!(timer.due_steps(start + Duration::from_millis(40), interval), 1);
        assert_eq!(timer.next_tick(interval), Some(start + Duration::from_millis(60)));
        // A late tick makes up for every missed interval.
        assert_eq!(timer.due_steps(start + Duration::from_millis(145), interval), 5);
    }

    #[test]
    fn huge_interval_has_no_next_tick() {
        let start = Instant::now();
        let mut timer = PacingTimer::new(start);
        assert_eq!(timer.due_steps(start + Duration::from_secs(1), Duration::MAX), 0);
        assert_eq!(timer.next_tick(Duration::MAX), None);
    }

    #[test]
    fn time_going_backwards_yields_nothing() {
        let start = Instant::now() + Duration::from_secs(1);
        let mut timer = PacingTimer::new(start);
        assert_eq!(
            timer.due_steps(start - Duration::from_millis(500), Duration::from_millis(1)),
            0
        );
    }
}
