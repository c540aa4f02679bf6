use core::time::Duration;

use smol::Timer;

use crate::futures::SleepProvider;

/// An implementation of [`SleepProvider`] using Smol's timer.
pub struct SmolSleep;
impl SleepProvider for SmolSleep {
    async fn sleep_for(dur: Duration) {
        Timer::after(dur).await;
    }
}

/// An implementation of [`SleepProvider`] using Smol's yield.
///
/// Polls again as soon as the executor gets back to the task. Lower latency
/// than [`SmolSleep`] at the cost of more rescheduling under load.
pub struct SmolYield;
impl SleepProvider for SmolYield {
    async fn sleep_for(_dur: Duration) {
        smol::future::yield_now().await;
    }
}
