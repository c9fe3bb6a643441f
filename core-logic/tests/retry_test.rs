use core_logic::{with_retry, RetryConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_retry_success_first_try() {
    let counter = Arc::new(AtomicUsize::new(0));
    let config = RetryConfig::new(3, 10);

    let result: Result<String, anyhow::Error> = with_retry(config, "test_op", || async {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok("success".to_string())
    })
    .await;

    assert!(result.is_ok());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_retry_success_after_failures() {
    let counter = Arc::new(AtomicUsize::new(0));
    let config = RetryConfig::new(3, 10);

    let result: Result<String, anyhow::Error> = with_retry(config, "test_op", || async {
        let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
        if count < 3 {
            Err(anyhow::anyhow!("temporary error"))
        } else {
            Ok("success".to_string())
        }
    })
    .await;

    assert!(result.is_ok());
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_all_failures_attempts_exactly_bounded() {
    let counter = Arc::new(AtomicUsize::new(0));
    let config = RetryConfig::new(3, 10);

    let result: Result<String, anyhow::Error> = with_retry(config, "test_op", || async {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("permanent error"))
    })
    .await;

    // max_attempts is the total attempt budget, not the retry count:
    // three attempts, never four.
    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_flat_delay_between_attempts() {
    let counter = Arc::new(AtomicUsize::new(0));
    let config = RetryConfig::new(3, 50);

    let start = tokio::time::Instant::now();
    let result: Result<String, anyhow::Error> = with_retry(config, "test_op", || async {
        let count = counter.fetch_add(1, Ordering::SeqCst) + 1;
        if count < 3 {
            Err(anyhow::anyhow!("temp"))
        } else {
            Ok("done".to_string())
        }
    })
    .await;

    // Two sleeps of the flat delay: attempt 1 -> 2 and 2 -> 3.
    let elapsed = start.elapsed();
    assert!(result.is_ok());
    assert!(elapsed >= Duration::from_millis(100));
    assert!(elapsed < Duration::from_millis(500));
}

#[tokio::test]
async fn test_retry_error_carries_attempt_count() {
    let config = RetryConfig::new(2, 1);

    let result: Result<(), anyhow::Error> = with_retry(config, "status_check", || async {
        Err(anyhow::anyhow!("connection refused"))
    })
    .await;

    let msg = format!("{:#}", result.unwrap_err());
    assert!(msg.contains("status_check failed after 2 attempts"));
    assert!(msg.contains("connection refused"));
}

#[tokio::test]
async fn test_retry_zero_attempts_still_runs_once() {
    let counter = Arc::new(AtomicUsize::new(0));
    let config = RetryConfig::new(0, 1);

    let result: Result<(), anyhow::Error> = with_retry(config, "test_op", || async {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("nope"))
    })
    .await;

    assert!(result.is_err());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}
