pub mod mock_signaling;
pub mod recording_observer;

pub use mock_signaling::*;
pub use mock_transport::*;
pub use recording_observer::*;

use std::future::Future;
use std::time::{Duration, Instant};

pub const WAIT_TIMEOUT_MS: u64 = 2000;

/// How long to watch for something that must NOT happen.
pub const QUIET_PERIOD_MS: u64 = 200;

/// Polls `check` every 10ms until it returns true or `timeout_ms` passes.
pub async fn poll_until<F, Fut>(timeout_ms: u64, mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();
    let timeout = Duration::from_millis(timeout_ms);

    loop {
        if check().await {
            return true;
        }
        if start.elapsed() > timeout {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
