//! Small async helpers.

use std::future::Future;
use std::time::Duration;

use crate::error::EngineError;

/// Wrap a future with a timeout.
pub async fn with_timeout<T>(
    duration: Duration,
    future: impl Future<Output = Result<T, EngineError>>,
) -> Result<T, EngineError> {
    match tokio::time::timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(EngineError::Timeout(duration.as_millis() as u64)),
    }
}
