//! Bounded polling helpers.
//!
//! The workflow never gets page-state change notifications; it re-checks the
//! page on an interval until a deadline passes. These helpers keep that
//! contract in one place instead of scattering sleep loops around.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Re-run `lookup` every `interval` until it yields a value or `timeout`
/// elapses. The lookup always runs at least once, even with a zero timeout.
pub async fn until_some<T, F, Fut>(mut lookup: F, timeout: Duration, interval: Duration) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = lookup().await {
            return Some(value);
        }
        if Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(interval).await;
    }
}

/// Re-run `predicate` every `interval` until it holds or `timeout` elapses.
/// Returns whether the condition was met in time.
pub async fn until<F, Fut>(mut predicate: F, timeout: Duration, interval: Duration) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    until_some(
        || {
            let check = predicate();
            async move { check.await.then_some(()) }
        },
        timeout,
        interval,
    )
    .await
    .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_until_times_out_when_predicate_never_holds() {
        let checks = Arc::new(AtomicUsize::new(0));
        let counter = checks.clone();

        let ok = until(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { false }
            },
            Duration::from_secs(10),
            Duration::from_secs(1),
        )
        .await;

        assert!(!ok);
        // one initial check plus one per interval tick
        assert_eq!(checks.load(Ordering::SeqCst), 11);
    }

    #[tokio::test(start_paused = true)]
    async fn test_until_succeeds_once_predicate_flips() {
        let checks = Arc::new(AtomicUsize::new(0));
        let counter = checks.clone();

        let ok = until(
            move || {
                let seen = counter.fetch_add(1, Ordering::SeqCst);
                async move { seen >= 3 }
            },
            Duration::from_secs(10),
            Duration::from_secs(1),
        )
        .await;

        assert!(ok);
        assert_eq!(checks.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_until_checks_at_least_once_with_zero_timeout() {
        let ok = until(|| async { true }, Duration::ZERO, Duration::from_secs(1)).await;
        assert!(ok);

        let ok = until(|| async { false }, Duration::ZERO, Duration::from_secs(1)).await;
        assert!(!ok);
    }

    #[tokio::test(start_paused = true)]
    async fn test_until_some_returns_first_value() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let found = until_some(
            move || {
                let seen = counter.fetch_add(1, Ordering::SeqCst);
                async move { (seen == 2).then(|| "ready") }
            },
            Duration::from_secs(30),
            Duration::from_secs(1),
        )
        .await;

        assert_eq!(found, Some("ready"));
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
