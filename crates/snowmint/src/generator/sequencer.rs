use core::{cmp::Ordering, time::Duration};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::{Error, Poll, Result, SnowflakeId, WorkerIdSource, config::check_range};

/// Validates the identity fields and builds the initial state: the current
/// timestamp with sequence zero.
///
/// `now` is in milliseconds since the Unix epoch.
pub(crate) fn initial_state(
    center_id: i64,
    worker: impl WorkerIdSource,
    epoch: Duration,
    now: u64,
) -> Result<SnowflakeId> {
    let center_id = check_range("center_id", center_id, SnowflakeId::max_center_id())?;
    let worker_id = check_range("worker_id", worker.resolve()?, SnowflakeId::max_worker_id())?;

    let epoch_ms = epoch.as_millis() as u64;
    let Some(elapsed) = now.checked_sub(epoch_ms) else {
        return Err(Error::invalid(format!(
            "epoch {epoch_ms} ms is later than the current time {now} ms"
        )));
    };
    if elapsed > SnowflakeId::max_timestamp() {
        return Err(Error::TimestampOverflow { elapsed });
    }

    #[cfg(feature = "tracing")]
    debug!(center_id, worker_id, epoch_ms, "snowflake generator initialized");

    Ok(SnowflakeId::from_components(elapsed, center_id, worker_id, 0))
}

/// Computes the next state from the last issued one and a fresh clock
/// reading.
///
/// `Poll::Ready { id }` is the new state and must be stored by the caller;
/// `Poll::Pending` and errors leave the state as it was.
pub(crate) fn next_state(state: SnowflakeId, now: u64, epoch_ms: u64) -> Result<Poll> {
    let last = state.timestamp();
    let Some(elapsed) = now.checked_sub(epoch_ms) else {
        return Err(cold_clock_behind(now, last + epoch_ms));
    };

    match elapsed.cmp(&last) {
        Ordering::Equal => {
            if state.has_sequence_room() {
                Ok(Poll::Ready {
                    id: state.increment_sequence(),
                })
            } else {
                Ok(Poll::Pending { yield_for: 1 })
            }
        }
        Ordering::Greater => {
            if elapsed > SnowflakeId::max_timestamp() {
                return Err(Error::TimestampOverflow { elapsed });
            }
            Ok(Poll::Ready {
                id: state.rollover_to_timestamp(elapsed),
            })
        }
        Ordering::Less => Err(cold_clock_behind(now, last + epoch_ms)),
    }
}

#[cold]
#[inline(never)]
fn cold_clock_behind(now: u64, last: u64) -> Error {
    debug_assert!(now < last);
    #[cfg(feature = "tracing")]
    warn!(now, last, behind_ms = last - now, "clock moved backwards, refusing to issue id");
    Error::ClockRegression { now, last }
}
