use core::{future::Future, time::Duration};

/// A trait that abstracts over how to sleep for a given [`Duration`] in async
/// contexts.
///
/// This allows the generator to be generic over runtimes like `Tokio` or
/// `Smol`.
pub trait SleepProvider {
    /// The returned future must be `Send` so generation futures can move
    /// across threads.
    fn sleep_for(dur: Duration) -> impl Future<Output = ()> + Send;
}
