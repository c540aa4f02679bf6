use std::time::{SystemTime, UNIX_EPOCH};

use crate::time::TimeSource;

/// A [`TimeSource`] backed by [`SystemTime`].
///
/// Every call reads the wall clock, so NTP steps and manual adjustments are
/// visible to the generator. A backwards step surfaces as
/// [`Error::ClockRegression`].
///
/// A system clock set before 1970 reads as `0`.
///
/// [`Error::ClockRegression`]: crate::Error::ClockRegression
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_EPOCH;

    #[test]
    fn system_clock_is_past_default_epoch() {
        let now = SystemClock.current_millis();
        assert!(now > DEFAULT_EPOCH.as_millis() as u64);
    }

    #[test]
    fn system_clock_does_not_run_backwards_between_reads() {
        // not a guarantee of the wall clock, but holds on any sane test host
        let a = SystemClock.current_millis();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = SystemClock.current_millis();
        assert!(b >= a);
    }
}
