use core::time::Duration;

/// Default epoch: Monday, January 1, 2024 00:00:00 UTC
pub const DEFAULT_EPOCH: Duration = Duration::from_millis(1_704_067_200_000);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests.
///
/// The unit is **milliseconds since the Unix epoch**. The generator subtracts
/// its configured epoch itself, and compares successive readings to detect a
/// clock that moved backwards.
///
/// # Example
///
/// ```
/// use snowmint::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1_704_067_200_123
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1_704_067_200_123);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}
