//! Bounded provider calls
//!
//! Each provider call gets its own [`CancellationToken`]. The call is raced
//! against a timer; when the timer wins the token is cancelled and the call
//! future is dropped, which aborts the in-flight HTTP request. When the call
//! wins, the timer is dropped together with the `timeout` future on that
//! same path, whatever the call's outcome was.

use crate::utils::error::{RelayError, Result};
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Run `call`, bounded by `deadline` when one is configured
pub async fn run_with_deadline<F, T>(
    deadline: Option<Duration>,
    cancel: &CancellationToken,
    call: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let Some(limit) = deadline else {
        return call.await;
    };

    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            cancel.cancel();
            warn!(timeout_secs = limit.as_secs(), "Provider call hit the deadline");
            Err(RelayError::DeadlineExceeded(limit))
        }
    }
}
