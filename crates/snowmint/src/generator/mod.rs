mod basic;
mod interface;
#[cfg(feature = "lock")]
mod lock;
#[cfg(feature = "lock")]
mod mutex;
mod sequencer;
mod status;

pub use basic::*;
pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "lock")))]
#[cfg(feature = "lock")]
pub use lock::*;
#[cfg_attr(docsrs, doc(cfg(feature = "lock")))]
#[cfg(feature = "lock")]
pub use mutex::*;
pub use status::*;
