use std::net::ToSocketAddrs;

#[cfg(feature = "tracing")]
use tracing::debug;

use crate::{Error, Result};

/// Supplies the worker ID a generator stamps into every ID.
///
/// The source is consulted exactly once, when the generator is built. The
/// returned value is range-checked by the generator, so implementations do not
/// need to clamp it themselves.
///
/// A plain `i64` is a source that always yields itself:
///
/// ```
/// use snowmint::WorkerIdSource;
///
/// assert_eq!(7_i64.resolve(), Ok(7));
/// ```
pub trait WorkerIdSource {
    /// Returns the worker ID for this process.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WorkerIdUnavailable`] when the underlying lookup fails.
    fn resolve(&self) -> Result<i64>;
}

impl WorkerIdSource for i64 {
    fn resolve(&self) -> Result<i64> {
        Ok(*self)
    }
}

impl<S: WorkerIdSource + ?Sized> WorkerIdSource for &S {
    fn resolve(&self) -> Result<i64> {
        (**self).resolve()
    }
}

/// Derives a worker ID from the addresses a host name resolves to.
///
/// The textual form of every resolved address is hashed, in resolution order,
/// with 64-bit FNV-1, and the hash is folded into `1..=31`. Processes on the
/// same host therefore share a worker ID; give them distinct center IDs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostWorkerId {
    host: String,
}

impl Default for HostWorkerId {
    fn default() -> Self {
        Self::new("localhost")
    }
}

impl HostWorkerId {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl WorkerIdSource for HostWorkerId {
    fn resolve(&self) -> Result<i64> {
        let unavailable = |reason: String| Error::WorkerIdUnavailable {
            host: self.host.clone(),
            reason,
        };

        let addrs: Vec<String> = (self.host.as_str(), 0)
            .to_socket_addrs()
            .map_err(|e| unavailable(e.to_string()))?
            .map(|addr| addr.ip().to_string())
            .collect();

        if addrs.is_empty() {
            return Err(unavailable("no addresses".into()));
        }

        let worker_id = worker_id_from_addrs(&addrs);
        #[cfg(feature = "tracing")]
        debug!(host = %self.host, ?addrs, worker_id, "derived worker id from host");
        Ok(worker_id)
    }
}

/// Folds a list of address strings into a worker ID in `1..=31`.
pub fn worker_id_from_addrs<S: AsRef<str>>(addrs: &[S]) -> i64 {
    let hash = fnv1_64(addrs.iter().flat_map(|a| a.as_ref().bytes()));
    (hash % 31) as i64 + 1
}

fn fnv1_64(bytes: impl IntoIterator<Item = u8>) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    bytes.into_iter().fold(OFFSET_BASIS, |hash, byte| {
        hash.wrapping_mul(PRIME) ^ u64::from(byte)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fnv1_reference_values() {
        assert_eq!(fnv1_64([0_u8; 0]), 0xcbf2_9ce4_8422_2325);
        assert_eq!(fnv1_64(*b"a"), 0xaf63_bd4c_8601_b7be);
    }

    #[test]
    fn worker_id_from_addrs_is_stable_and_in_range() {
        let addrs = ["127.0.0.1", "::1"];
        let first = worker_id_from_addrs(&addrs);
        assert_eq!(first, worker_id_from_addrs(&addrs));
        assert!((1..=31).contains(&first));
    }

    #[test]
    fn worker_id_depends_on_address_order() {
        let expected = (fnv1_64(*b"::1127.0.0.1") % 31) as i64 + 1;
        assert_eq!(worker_id_from_addrs(&["::1", "127.0.0.1"]), expected);
    }

    #[test]
    fn empty_address_list_hashes_offset_basis() {
        let none: [&str; 0] = [];
        assert_eq!(
            worker_id_from_addrs(&none),
            (0xcbf2_9ce4_8422_2325_u64 % 31) as i64 + 1
        );
    }

    #[test]
    fn fixed_source_returns_itself() {
        assert_eq!(0_i64.resolve(), Ok(0));
        assert_eq!((&31_i64).resolve(), Ok(31));
    }

    #[test]
    fn localhost_resolves_in_range() {
        let id = HostWorkerId::default().resolve().unwrap();
        assert!((1..=31).contains(&id));
    }

    #[test]
    fn unresolvable_host_is_unavailable() {
        let source = HostWorkerId::new("no-such-host.invalid");
        match source.resolve() {
            Err(Error::WorkerIdUnavailable { host, .. }) => {
                assert_eq!(host, "no-such-host.invalid");
            }
            other => panic!("expected WorkerIdUnavailable, got {other:?}"),
        }
    }
}
