use core::{future::Future, time::Duration};

use super::SleepProvider;
use crate::{Poll, Result, SnowflakeGenerator, SnowflakeId, TimeSource};

/// Extension trait for asynchronously generating Snowflake IDs.
///
/// When the current millisecond's sequence is exhausted, the returned future
/// waits through the [`SleepProvider`] `S` instead of blocking the thread.
/// Dropping the future cancels the wait; no ID is consumed by a cancelled
/// call, so wrapping it in a timeout is safe:
///
/// ```
/// # #[cfg(all(feature = "async-tokio", feature = "lock"))]
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// use core::time::Duration;
/// use snowmint::{LockSnowflakeGenerator, SnowflakeGeneratorAsyncExt, SystemClock, TokioSleep};
///
/// let generator = LockSnowflakeGenerator::new(1, 1_i64, SystemClock).unwrap();
/// let id = tokio::time::timeout(
///     Duration::from_millis(50),
///     generator.try_next_id_async::<TokioSleep>(),
/// )
/// .await
/// .expect("timed out")
/// .unwrap();
/// assert_eq!(id.center_id(), 1);
/// # });
/// ```
pub trait SnowflakeGeneratorAsyncExt<T>
where
    T: TimeSource,
{
    /// Returns a future that resolves to the next available Snowflake ID.
    ///
    /// If the generator is not ready to issue a new ID immediately, the future
    /// sleeps for the amount of time indicated by the generator and retries.
    ///
    /// # Errors
    ///
    /// This future may return an error if the generator encounters one, for
    /// example [`Error::ClockRegression`].
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    fn try_next_id_async<S>(&self) -> impl Future<Output = Result<SnowflakeId>>
    where
        S: SleepProvider;
}

impl<G, T> SnowflakeGeneratorAsyncExt<T> for G
where
    G: SnowflakeGenerator<T>,
    T: TimeSource,
{
    fn try_next_id_async<S>(&self) -> impl Future<Output = Result<SnowflakeId>>
    where
        S: SleepProvider,
    {
        async {
            loop {
                let dur = match self.try_poll_id()? {
                    Poll::Ready { id } => return Ok(id),
                    Poll::Pending { yield_for } => Duration::from_millis(yield_for),
                };
                S::sleep_for(dur).await;
            }
        }
    }
}
