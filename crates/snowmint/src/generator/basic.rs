use core::{cell::Cell, time::Duration};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Config, DEFAULT_EPOCH, Poll, Result, SnowflakeGenerator, SnowflakeId, TimeSource,
    WorkerIdSource,
    generator::sequencer::{initial_state, next_state},
};

/// A non-concurrent Snowflake ID generator suitable for single-threaded
/// environments.
///
/// This generator is lightweight and fast, but **not thread-safe**: its
/// state lives in a [`Cell`], so the type is `!Sync` and the compiler rules
/// out unsynchronized sharing.
///
/// ## Features
/// - ❌ Not thread-safe
/// - ✅ Fails loudly on clock regression
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - You want the fastest generator
///
/// ## See Also
/// - [`LockSnowflakeGenerator`]
///
/// [`LockSnowflakeGenerator`]: crate::generator::LockSnowflakeGenerator
pub struct BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    state: Cell<SnowflakeId>,
    epoch_ms: u64,
    time: T,
}

impl<T> BasicSnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a new [`BasicSnowflakeGenerator`] against [`DEFAULT_EPOCH`].
    ///
    /// The worker ID is resolved once, here, and the clock is read once to
    /// seed the last observed timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for an out-of-range center or
    /// worker ID, and whatever `worker` returns if it fails to resolve.
    ///
    /// # Example
    /// ```
    /// use snowmint::{BasicSnowflakeGenerator, SystemClock};
    ///
    /// let generator = BasicSnowflakeGenerator::new(1, 7_i64, SystemClock).unwrap();
    /// let id = generator.generate_id().unwrap();
    /// assert_eq!(id.center_id(), 1);
    /// assert_eq!(id.worker_id(), 7);
    ///
    /// assert!(BasicSnowflakeGenerator::new(32, 7_i64, SystemClock).is_err());
    /// ```
    ///
    /// [`Error::InvalidConfiguration`]: crate::Error::InvalidConfiguration
    pub fn new(center_id: i64, worker: impl WorkerIdSource, time: T) -> Result<Self> {
        Self::with_epoch(center_id, worker, DEFAULT_EPOCH, time)
    }

    /// Creates a new generator measuring timestamps from `epoch` (a duration
    /// since 1970-01-01 UTC).
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
        Ok(Self {
            state: Cell::new(state),
            epoch_ms: epoch.as_millis() as u64,
            time,
        })
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
    /// This constructor is primarily useful for advanced use cases such as
    /// restoring state from persistent storage or controlling the starting
    /// point of the generator manually. `timestamp` is relative to `epoch`.
    ///
    /// # ⚠️ Note
    /// Components are not validated beyond debug assertions. In typical use
    /// cases, you should prefer [`Self::new`].
    pub fn from_components(
        timestamp: u64,
        center_id: u64,
        worker_id: u64,
        sequence: u64,
        epoch: Duration,
        time: T,
    ) -> Self {
        Self {
            state: Cell::new(SnowflakeId::from_components(
                timestamp, center_id, worker_id, sequence,
            )),
            epoch_ms: epoch.as_millis() as u64,
            time,
        }
    }

    pub fn center_id(&self) -> u64 {
        self.state.get().center_id()
    }

    pub fn worker_id(&self) -> u64 {
        self.state.get().worker_id()
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
    ///
    /// [`Error::ClockRegression`] when the clock reads earlier than the last
    /// issued timestamp; the state is left untouched.
    ///
    /// # Example
    /// ```
    /// use snowmint::{BasicSnowflakeGenerator, Poll, SystemClock};
    ///
    /// let generator = BasicSnowflakeGenerator::new(0, 1_i64, SystemClock).unwrap();
    ///
    /// let id = loop {
    ///     match generator.try_poll_id() {
    ///         Ok(Poll::Ready { id }) => break id,
    ///         Ok(Poll::Pending { .. }) => std::thread::yield_now(),
    ///         Err(e) => panic!("generator error: {e}"),
    ///     }
    /// };
    /// assert_eq!(id.worker_id(), 1);
    /// ```
    ///
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll_id(&self) -> Result<Poll> {
        let now = self.time.current_millis();
        let poll = next_state(self.state.get(), now, self.epoch_ms)?;
        if let Poll::Ready { id } = poll {
            self.state.set(id);
        }
        Ok(poll)
    }

    /// Generates a new ID, calling `f` with the suggested wait whenever the
    /// sequence is exhausted.
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

impl<T> SnowflakeGenerator<T> for BasicSnowflakeGenerator<T>
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
