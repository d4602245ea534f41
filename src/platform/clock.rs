//! Fixed-rate pacing clock

use std::time::{Duration, Instant};

/// Sleeps away whatever is left of each tick's time slice
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Length of one tick at `target_hz` (0 means unpaced)
    pub fn period(target_hz: u32) -> Duration {
        if target_hz == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / target_hz
        }
    }

    /// Block until one period has passed since the previous call.
    /// Returns how long it slept.
    pub fn tick(&mut self, target_hz: u32) -> Duration {
        let elapsed = self.last.elapsed();
        let period = Self::period(target_hz);
        let slept = period.saturating_sub(elapsed);
        if !slept.is_zero() {
            std::thread::sleep(slept);
        }
        self.last = Instant::now();
        slept
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period() {
        assert_eq!(FrameClock::period(10), Duration::from_millis(100));
        assert_eq!(FrameClock::period(0), Duration::ZERO);
    }

    #[test]
    fn test_tick_caps_rate() {
        let mut clock = FrameClock::new();
        let start = Instant::now();
        clock.tick(100);
        clock.tick(100);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn test_late_tick_does_not_sleep() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(clock.tick(100), Duration::ZERO);
    }
}
