/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `snowmint` can emit.
///
/// Every variant is fatal for the call that produced it: a generator either
/// returns a valid, unique ID or it returns one of these, never both.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An identity field or the epoch was outside its valid range at
    /// construction time. The generator is not created.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// The clock reported a time earlier than the last observed timestamp.
    ///
    /// Both values are milliseconds since the Unix epoch. No ID is produced
    /// and the generator state is left untouched.
    #[error("clock moved backwards: now {now} ms, last {last} ms")]
    ClockRegression { now: u64, last: u64 },

    /// The worker id could not be resolved from the host.
    #[error("failed to resolve worker id from {host:?}: {reason}")]
    WorkerIdUnavailable { host: String, reason: String },

    /// More milliseconds elapsed since the epoch than the 41-bit timestamp
    /// field can hold.
    #[error("timestamp overflow: {elapsed} ms since epoch exceeds the 41-bit field")]
    TimestampOverflow { elapsed: u64 },

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(all(feature = "lock", not(feature = "parking-lot")))))]
    #[cfg(all(feature = "lock", not(feature = "parking-lot")))]
    #[error("generator lock poisoned")]
    LockPoisoned,
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(all(feature = "lock", not(feature = "parking-lot")))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
