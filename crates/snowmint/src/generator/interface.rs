use crate::{Poll, Result, SnowflakeId, TimeSource, WorkerIdSource};

/// A minimal interface for generating Snowflake IDs.
pub trait SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new generator against [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfiguration`] if `center_id` or the resolved worker
    ///   ID is outside `0..=31`, or the clock reads earlier than the epoch.
    /// - [`Error::WorkerIdUnavailable`] if `worker` fails to resolve.
    ///
    /// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    /// [`Error::WorkerIdUnavailable`]: crate::Error::WorkerIdUnavailable
    fn new(center_id: i64, worker: impl WorkerIdSource, time: T) -> Result<Self>
    where
        Self: Sized;

    /// Attempts to generate the next ID without waiting.
    ///
    /// The returned [`Poll`] contains either:
    /// - the newly generated ID, or
    /// - a duration to yield/sleep if the sequence is exhausted for the
    ///   current millisecond.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockRegression`] if the clock reads earlier than the last
    ///   issued timestamp.
    /// - [`Error::TimestampOverflow`] once the 41-bit timestamp is spent.
    /// - [`Error::LockPoisoned`] for a poisoned lock-based generator.
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    /// [`Error::LockPoisoned`]: crate::Error
    fn try_poll_id(&self) -> Result<Poll>;

    /// Generates the next ID, calling `f` with the suggested wait (in
    /// milliseconds) every time the sequence is exhausted.
    ///
    /// `f` decides how to wait: spin, yield, or sleep.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::try_poll_id`] ends the loop and is returned.
    fn try_next_id(&self, mut f: impl FnMut(u64)) -> Result<SnowflakeId> {
        loop {
            match self.try_poll_id()? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => f(yield_for),
            }
        }
    }

    /// Generates the next ID, yielding the thread while the current
    /// millisecond's sequence is exhausted.
    ///
    /// # Errors
    ///
    /// See [`Self::try_poll_id`].
    fn generate_id(&self) -> Result<SnowflakeId> {
        self.try_next_id(|_| std::thread::yield_now())
    }
}
