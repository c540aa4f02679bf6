use crate::SnowflakeId;

/// The outcome of a single, non-blocking generation attempt.
///
/// - [`Poll::Ready`] carries a freshly issued ID.
/// - [`Poll::Pending`] means all 4096 sequence values of the current
///   millisecond are spent. Nothing was issued and the generator state is
///   unchanged; retry once the clock has advanced.
///
/// Clock regression is not a `Pending` case: it is reported as
/// [`Error::ClockRegression`] because waiting it out could take arbitrarily
/// long.
///
/// [`Error::ClockRegression`]: crate::Error::ClockRegression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowflakeId,
    },
    /// The sequence is exhausted for the current millisecond.
    Pending {
        /// Milliseconds to wait before polling again.
        yield_for: u64,
    },
}
