use core::time::Duration;
use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Config, DEFAULT_EPOCH, Poll, Result, SnowflakeGenerator, SnowflakeId, TimeSource,
    WorkerIdSource,
    generator::{
        Mutex,
        sequencer::{initial_state, next_state},
    },
};

/// A lock-based Snowflake ID generator suitable for multi-threaded
/// environments.
///
/// This generator wraps the Snowflake state in an [`Arc<Mutex<_>>`], allowing
/// safe shared use across threads. Clones share the same state, so a clone
/// handed to another thread keeps issuing from the same sequence.
///
/// The clock is read while the lock is held. A thread that read the clock
/// early and then lost the race for the lock would otherwise see its stale
/// reading as a clock regression.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Fails loudly on clock regression
///
/// ## Recommended When
/// - You're in a multi-threaded environment
/// - Fair access across threads is important
///
/// ## See Also
/// - [`BasicSnowflakeGenerator`]
///
/// [`BasicSnowflakeGenerator`]: crate::generator::BasicSnowflakeGenerator
pub struct LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    pub(crate) state: Arc<crossbeam_utils::CachePadded<Mutex<SnowflakeId>>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Arc<Mutex<SnowflakeId>>,
    epoch_ms: u64,
    time: T,
}

impl<T> Clone for LockSnowflakeGenerator<T>
where
    T: TimeSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            epoch_ms: self.epoch_ms,
            time: self.time.clone(),
        }
    }
}

impl<T> LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`LockSnowflakeGenerator`] against [`DEFAULT_EPOCH`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an out-of-range center or
    /// worker ID, and whatever `worker` returns if it fails to resolve.
    ///
    /// # Example
    /// ```
    /// use std::{sync::Arc, thread};
    /// use snowmint::{LockSnowflakeGenerator, SystemClock};
    ///
    /// let generator = Arc::new(LockSnowflakeGenerator::new(2, 5_i64, SystemClock).unwrap());
    ///
    /// let handles: Vec<_> = (0..4)
    ///     .map(|_| {
    ///         let generator = Arc::clone(&generator);
    ///         thread::spawn(move || generator.generate_id().unwrap())
    ///     })
    ///     .collect();
    ///
    /// for handle in handles {
    ///     assert_eq!(handle.join().unwrap().center_id(), 2);
    /// }
    /// ```
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn new(center_id: i64, worker: impl WorkerIdSource, time: T) -> Result<Self> {
        Self::with_epoch(center_id, worker, DEFAULT_EPOCH, time)
    }

    /// Creates a new generator measuring timestamps from `epoch`.
    ///
    /// # Errors
    ///
    /// As [`Self::new`], plus [`Error::InvalidConfiguration`] if the clock
    /// reads earlier than `epoch`.
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn with_epoch(
        center_id: i64,
        worker: impl WorkerIdSource,
        epoch: Duration,
        time: T,
    ) -> Result<Self> {
        let state = initial_state(center_id, worker, epoch, time.current_millis())?;
        Ok(Self::from_state(state, epoch, time))
    }

    /// Creates a generator from a [`Config`].
    ///
    /// # Errors
    ///
    /// As [`Self::with_epoch`].
    pub fn from_config(config: &Config, time: T) -> Result<Self> {
        Self::with_epoch(
            config.center_id,
            config.worker_source(),
            config.epoch(),
            time,
        )
    }

    /// Creates a new ID generator from explicit component values.
    ///
    /// `timestamp` is relative to `epoch`. Components are not validated
    /// beyond debug assertions; prefer [`Self::new`] in typical use.
    pub fn from_components(
        timestamp: u64,
        center_id: u64,
        worker_id: u64,
        sequence: u64,
        epoch: Duration,
        time: T,
    ) -> Self {
        let state = SnowflakeId::from_components(timestamp, center_id, worker_id, sequence);
        Self::from_state(state, epoch, time)
    }

    fn from_state(state: SnowflakeId, epoch: Duration, time: T) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(state))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(state)),
            epoch_ms: epoch.as_millis() as u64,
            time,
        }
    }

    pub fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch_ms)
    }

    /// Attempts to generate the next available ID.
    ///
    /// Returns a new, time-ordered, unique ID if generation succeeds. If the
    /// sequence is full and the time has not advanced, it returns
    /// [`Poll::Pending`].
    ///
    /// # Errors
    /// - [`Error::ClockRegression`] when the clock reads earlier than the last
    ///   issued timestamp.
    /// - [`Error::LockPoisoned`] if the underlying lock has been poisoned.
    ///
    /// # Example
    /// ```
    /// use snowmint::{LockSnowflakeGenerator, Poll, SystemClock};
    ///
    /// let generator = LockSnowflakeGenerator::new(0, 0_i64, SystemClock).unwrap();
    ///
    /// let id = loop {
    ///     match generator.try_poll_id() {
    ///         Ok(Poll::Ready { id }) => break id,
    ///         Ok(Poll::Pending { yield_for }) => {
    ///             std::thread::sleep(core::time::Duration::from_millis(yield_for));
    ///         }
    ///         Err(e) => panic!("generator error: {e}"),
    ///     }
    /// };
    /// ```
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::LockPoisoned`]: crate::Error
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<Poll> {
        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let now = self.time.current_millis();
        let poll = next_state(*state, now, self.epoch_ms)?;
        if let Poll::Ready { id } = poll {
            *state = id;
        }
        Ok(poll)
    }

    /// Generates a new ID, calling `f` with the suggested wait whenever the
    /// sequence is exhausted. The lock is not held while `f` runs.
    ///
    /// # Errors
    ///
    /// See [`Self::try_poll_id`].
    pub fn try_next_id(&self, f: impl FnMut(u64)) -> Result<SnowflakeId> {
        <Self as SnowflakeGenerator<T>>::try_next_id(self, f)
    }

    /// Generates a new ID, yielding the thread while the current
    /// millisecond's sequence is exhausted.
    ///
    /// # Errors
    ///
    /// See [`Self::try_poll_id`].
    pub fn generate_id(&self) -> Result<SnowflakeId> {
        <Self as SnowflakeGenerator<T>>::generate_id(self)
    }
}

impl<T> SnowflakeGenerator<T> for LockSnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn new(center_id: i64, worker: impl WorkerIdSource, time: T) -> Result<Self> {
        Self::new(center_id, worker, time)
    }

    fn try_poll_id(&self) -> Result<Poll> {
        self.try_poll_id()
    }
}
