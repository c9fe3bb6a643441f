use anyhow::{Context, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded retry with a flat delay between attempts.
///
/// The remote reward API is polled on a cadence of minutes, so there is no
/// exponential backoff or jitter here: a fixed pause between attempts is
/// enough and keeps the timing predictable.
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: u32, delay_ms: u64) -> Self {
        Self {
            max_attempts,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

/// Runs `operation` up to `config.max_attempts` times, sleeping the flat
/// delay between attempts. The last error is returned with context once the
/// budget is spent; callers decide whether that is fatal.
pub async fn with_retry<T, F, Fut>(
    config: RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max = config.max_attempts.max(1);

    for attempt in 1..=max {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                if attempt == max {
                    let error_msg = format!("{}", e);
                    return Err(e).context(format!(
                        "{} failed after {} attempts. Last error: {}",
                        operation_name, max, error_msg
                    ));
                }

                warn!(
                    "{} failed (attempt {}/{}). Retrying in {:?}: {}",
                    operation_name, attempt, max, config.delay, e
                );

                tokio::time::sleep(config.delay).await;
            }
        }
    }

    unreachable!()
}
