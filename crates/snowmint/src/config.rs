//! Generator configuration.
//!
//! A [`Config`] carries the identity (center and worker ID) and the epoch of a
//! generator. It can be built in code, deserialized with the `serde` feature,
//! or read from the environment with the `env` feature:
//!
//! | Variable              | Field          | Default                 |
//! |-----------------------|----------------|-------------------------|
//! | `SNOWMINT_CENTER_ID`  | `center_id`    | `0`                     |
//! | `SNOWMINT_WORKER_ID`  | `worker_id`    | derived from the host   |
//! | `SNOWMINT_EPOCH_MS`   | `epoch_millis` | [`DEFAULT_EPOCH`]       |

use core::time::Duration;

use crate::{DEFAULT_EPOCH, Error, HostWorkerId, Result, SnowflakeId, WorkerIdSource};

pub const ENV_CENTER_ID: &str = "SNOWMINT_CENTER_ID";
pub const ENV_WORKER_ID: &str = "SNOWMINT_WORKER_ID";
pub const ENV_EPOCH_MS: &str = "SNOWMINT_EPOCH_MS";

/// Identity and epoch of a generator.
///
/// Nothing is checked until a generator is built from it (or
/// [`Config::validate`] is called), so a config can be assembled field by
/// field.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Data center ID, `0..=31`.
    pub center_id: i64,
    /// Worker ID, `0..=31`. `None` derives one from the host with
    /// [`HostWorkerId`].
    pub worker_id: Option<i64>,
    /// Epoch in milliseconds since the Unix epoch.
    pub epoch_millis: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            center_id: 0,
            worker_id: None,
            epoch_millis: DEFAULT_EPOCH.as_millis() as u64,
        }
    }
}

impl Config {
    pub fn new(center_id: i64) -> Self {
        Self {
            center_id,
            ..Self::default()
        }
    }

    pub fn with_worker_id(mut self, worker_id: i64) -> Self {
        self.worker_id = Some(worker_id);
        self
    }

    pub fn with_epoch(mut self, epoch: Duration) -> Self {
        self.epoch_millis = epoch.as_millis() as u64;
        self
    }

    pub fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch_millis)
    }

    /// Checks the identity ranges without resolving a host worker ID or
    /// reading the clock.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_range("center_id", self.center_id, SnowflakeId::max_center_id())?;
        if let Some(worker_id) = self.worker_id {
            check_range("worker_id", worker_id, SnowflakeId::max_worker_id())?;
        }
        Ok(())
    }

    /// Builds a config from a key lookup, falling back to defaults for
    /// missing keys.
    ///
    /// # Errors
    ///
    /// Propagates lookup failures, and returns
    /// [`Error::InvalidConfiguration`] for values that do not parse.
    ///
    /// # Example
    /// ```
    /// use snowmint::Config;
    ///
    /// let config = Config::from_lookup(|key| {
    ///     Ok(match key {
    ///         "SNOWMINT_CENTER_ID" => Some("3".to_string()),
    ///         _ => None,
    ///     })
    /// })
    /// .unwrap();
    /// assert_eq!(config.center_id, 3);
    /// assert_eq!(config.worker_id, None);
    /// ```
    pub fn from_lookup(mut lookup: impl FnMut(&str) -> Result<Option<String>>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(v) = lookup(ENV_CENTER_ID)? {
            config.center_id = parse(ENV_CENTER_ID, &v)?;
        }
        if let Some(v) = lookup(ENV_WORKER_ID)? {
            config.worker_id = Some(parse(ENV_WORKER_ID, &v)?);
        }
        if let Some(v) = lookup(ENV_EPOCH_MS)? {
            config.epoch_millis = parse(ENV_EPOCH_MS, &v)?;
        }
        Ok(config)
    }

    /// Reads the config from the process environment, loading a `.env` file
    /// first if one is present.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] for unparseable or non-unicode values.
    #[cfg_attr(docsrs, doc(cfg(feature = "env")))]
    #[cfg(feature = "env")]
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| match dotenvy::var(key) {
            Ok(v) => Ok(Some(v)),
            Err(dotenvy::Error::EnvVar(std::env::VarError::NotPresent)) => Ok(None),
            Err(e) => Err(Error::invalid(format!("{key}: {e}"))),
        })
    }

    pub(crate) fn worker_source(&self) -> ConfiguredWorker {
        match self.worker_id {
            Some(id) => ConfiguredWorker::Fixed(id),
            None => ConfiguredWorker::Host(HostWorkerId::default()),
        }
    }
}

pub(crate) enum ConfiguredWorker {
    Fixed(i64),
    Host(HostWorkerId),
}

impl WorkerIdSource for ConfiguredWorker {
    fn resolve(&self) -> Result<i64> {
        match self {
            Self::Fixed(id) => Ok(*id),
            Self::Host(host) => host.resolve(),
        }
    }
}

pub(crate) fn check_range(field: &str, value: i64, max: u64) -> Result<u64> {
    u64::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or_else(|| Error::invalid(format!("{field} {value} out of range [0, {max}]")))
}

fn parse<N: core::str::FromStr>(key: &str, value: &str) -> Result<N>
where
    N::Err: core::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| Error::invalid(format!("{key}={value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| Ok(vars.get(key).cloned()))
    }

    #[test]
    fn default_uses_default_epoch_and_host_worker() {
        let config = Config::default();
        assert_eq!(config.center_id, 0);
        assert_eq!(config.worker_id, None);
        assert_eq!(config.epoch(), DEFAULT_EPOCH);
        assert!(matches!(config.worker_source(), ConfiguredWorker::Host(_)));
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = Config::new(4)
            .with_worker_id(9)
            .with_epoch(Duration::from_millis(1_000));
        assert_eq!(config.center_id, 4);
        assert_eq!(config.worker_id, Some(9));
        assert_eq!(config.epoch_millis, 1_000);
        assert_eq!(config.worker_source().resolve(), Ok(9));
    }

    #[test]
    fn validate_checks_both_identity_fields() {
        assert!(Config::new(0).with_worker_id(31).validate().is_ok());
        assert!(Config::new(31).validate().is_ok());

        for bad in [-1, 32] {
            assert!(matches!(
                Config::new(bad).validate(),
                Err(Error::InvalidConfiguration { .. })
            ));
            assert!(matches!(
                Config::new(0).with_worker_id(bad).validate(),
                Err(Error::InvalidConfiguration { .. })
            ));
        }
    }

    #[test]
    fn lookup_reads_all_keys() {
        let config = lookup_from(&[
            (ENV_CENTER_ID, "7"),
            (ENV_WORKER_ID, " 12 "),
            (ENV_EPOCH_MS, "1288834974657"),
        ])
        .unwrap();
        assert_eq!(
            config,
            Config {
                center_id: 7,
                worker_id: Some(12),
                epoch_millis: 1_288_834_974_657,
            }
        );
    }

    #[test]
    fn lookup_falls_back_to_defaults() {
        assert_eq!(lookup_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn lookup_rejects_garbage() {
        let err = lookup_from(&[(ENV_CENTER_ID, "seven")]).unwrap_err();
        match err {
            Error::InvalidConfiguration { reason } => {
                assert!(reason.starts_with("SNOWMINT_CENTER_ID=\"seven\""));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(lookup_from(&[(ENV_EPOCH_MS, "-5")]).is_err());
    }

    #[test]
    fn lookup_propagates_lookup_errors() {
        let err = Config::from_lookup(|_| Err(Error::invalid("boom"))).unwrap_err();
        assert_eq!(err, Error::invalid("boom"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_fills_missing_fields_with_defaults() {
        let config: Config = serde_json::from_str(r#"{ "center_id": 5 }"#).unwrap();
        assert_eq!(config, Config::new(5));

        let json = serde_json::to_string(&Config::new(1).with_worker_id(2)).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.worker_id, Some(2));
    }
}
