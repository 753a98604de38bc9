use std::time::Duration;

use super::classification::ErrorClassification;
use super::types::ArsenalError;
use tracing::warn;

impl ErrorClassification {
    /// Calculate the retry delay for this error classification based on the
    /// current attempt number (0-indexed).
    ///
    /// Lock contention clears in milliseconds (no network I/O inside the
    /// store), so delays are ms-scale: 25ms * 2^attempt + random jitter
    /// (0-25ms), capped at 250ms.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let base = 25.0 * 2.0_f64.powi(attempt as i32);
        let jitter = rand::random::<f64>() * 25.0;
        Duration::from_millis(((base + jitter).min(250.0)) as u64)
    }
}

/// Retry configuration for store write operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retries: 3 }
    }
}

/// Execute a store operation with retry logic.
///
/// Retries only if the error is classified as retryable (lock contention)
/// and the retry budget is not exhausted. Exhaustion surfaces the last
/// failure as `Storage` per the error taxonomy.
pub fn with_retry<F, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, ArsenalError>
where
    F: FnMut() -> Result<T, ArsenalError>,
{
    let max_attempts = config.max_retries + 1;

    for attempt in 0..max_attempts {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) => {
                let classification = e.classify();

                if !classification.retryable {
                    return Err(e);
                }
                if attempt + 1 >= max_attempts {
                    warn!(
                        operation = operation_name,
                        attempts = max_attempts,
                        error = %e,
                        "Lock wait budget exhausted"
                    );
                    return Err(ArsenalError::Storage(format!(
                        "lock wait exhausted after {} attempts: {}",
                        max_attempts, e
                    )));
                }

                let delay = classification.retry_delay(attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max = max_attempts,
                    error_type = classification.error_type,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying after lock contention"
                );
                std::thread::sleep(delay);
            }
        }
    }

    Err(ArsenalError::Storage(
        "Retry loop exited unexpectedly".into(),
    ))
}
