//! Snowflake-style 64-bit ID generation.
//!
//! ```text
//!  bit 63   62 ........ 22   21 .. 17   16 .. 12   11 ....... 0
//! +-------+--------------+----------+----------+--------------+
//! |   0   | timestamp 41 | center 5 | worker 5 | sequence 12  |
//! +-------+--------------+----------+----------+--------------+
//! ```
//!
//! The timestamp counts milliseconds since [`DEFAULT_EPOCH`] (2024-01-01 UTC)
//! unless a generator is built with its own epoch.
//!
//! ```
//! use snowmint::{BasicSnowflakeGenerator, SystemClock};
//!
//! let generator = BasicSnowflakeGenerator::new(1, 3_i64, SystemClock).unwrap();
//! let a = generator.generate_id().unwrap();
//! let b = generator.generate_id().unwrap();
//! assert!(b > a);
//! assert_eq!((b.center_id(), b.worker_id()), (1, 3));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod error;
#[cfg(feature = "futures")]
mod futures;
mod generator;
mod id;
mod time;
mod worker;

pub use crate::config::{Config, ENV_CENTER_ID, ENV_EPOCH_MS, ENV_WORKER_ID};
pub use crate::error::*;
#[cfg(feature = "futures")]
pub use crate::futures::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::time::*;
pub use crate::worker::*;
