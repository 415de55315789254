//! Tests for the sliding window limiter

use chrono::Duration;
use std::sync::Arc;

use cl_shared::RateLimitConfig;

use crate::clock::ManualClock;
use crate::errors::CredentialError;
use crate::services::rate_limit::{RateLimitStatus, SlidingWindowLimiter};

fn limiter(limit: u32, window_seconds: i64) -> (SlidingWindowLimiter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::starting_now());
    let limiter =
        SlidingWindowLimiter::with_clock(limit, Duration::seconds(window_seconds), clock.clone());
    (limiter, clock)
}

#[tokio::test]
async fn test_admits_limit_then_rejects_then_admits_after_window() {
    let (limiter, clock) = limiter(10, 60);

    for _ in 0..10 {
        assert!(limiter.allow("10.0.0.1").await);
    }
    assert!(!limiter.allow("10.0.0.1").await);

    clock.advance(Duration::seconds(61));
    assert!(limiter.allow("10.0.0.1").await);
}

#[tokio::test]
async fn test_window_boundary_is_exclusive_of_old_edge() {
    let (limiter, clock) = limiter(1, 60);

    assert!(limiter.allow("key").await);
    clock.advance(Duration::seconds(59));
    assert!(!limiter.allow("key").await);

    // Exactly one window later the first request has left (now - window, now]
    clock.advance(Duration::seconds(1));
    assert!(limiter.allow("key").await);
}

#[tokio::test]
async fn test_keys_are_independent() {
    let (limiter, _clock) = limiter(2, 60);

    assert!(limiter.allow("a").await);
    assert!(limiter.allow("a").await);
    assert!(!limiter.allow("a").await);

    assert!(limiter.allow("b").await);
}

#[tokio::test]
async fn test_rejected_requests_do_not_extend_window() {
    let (limiter, clock) = limiter(2, 60);

    assert!(limiter.allow("k").await);
    assert!(limiter.allow("k").await);

    for _ in 0..5 {
        clock.advance(Duration::seconds(10));
        assert!(!limiter.allow("k").await);
    }

    clock.advance(Duration::seconds(10));
    assert!(limiter.allow("k").await);
}

#[tokio::test]
async fn test_check_reports_remaining_budget() {
    let (limiter, _clock) = limiter(3, 60);

    assert_eq!(
        limiter.check("k").await,
        Ok(RateLimitStatus {
            remaining: 2,
            limit: 3
        })
    );
    assert_eq!(limiter.check("k").await.map(|s| s.remaining), Ok(1));
    assert_eq!(limiter.check("k").await.map(|s| s.remaining), Ok(0));
}

#[tokio::test]
async fn test_check_reports_retry_after_for_oldest_request() {
    let (limiter, clock) = limiter(2, 60);

    assert!(limiter.allow("k").await);
    clock.advance(Duration::seconds(20));
    assert!(limiter.allow("k").await);
    clock.advance(Duration::milliseconds(15_500));

    // Oldest request leaves the window in 24.5s, rounded up
    assert_eq!(
        limiter.check("k").await,
        Err(CredentialError::RateLimited {
            retry_after_seconds: 25
        })
    );
}

#[tokio::test]
async fn test_retry_after_is_at_least_one_second() {
    let (limiter, clock) = limiter(1, 60);

    assert!(limiter.allow("k").await);
    clock.advance(Duration::milliseconds(59_900));

    assert_eq!(
        limiter.check("k").await,
        Err(CredentialError::RateLimited {
            retry_after_seconds: 1
        })
    );
}

#[tokio::test]
async fn test_zero_limit_rejects_without_holding_state() {
    let (limiter, _clock) = limiter(0, 60);

    assert_eq!(
        limiter.check("k").await,
        Err(CredentialError::RateLimited {
            retry_after_seconds: 60
        })
    );
    assert_eq!(limiter.tracked_keys().await, 0);
}

#[tokio::test]
async fn test_purge_idle_shrinks_back_to_zero() {
    let (limiter, clock) = limiter(100, 60);

    for i in 0..50 {
        assert!(limiter.allow(&format!("burst-{i}")).await);
    }
    assert_eq!(limiter.tracked_keys().await, 50);

    clock.advance(Duration::seconds(30));
    assert!(limiter.allow("recent").await);
    assert_eq!(limiter.purge_idle().await, 0);

    clock.advance(Duration::seconds(31));
    assert_eq!(limiter.purge_idle().await, 50);
    assert_eq!(limiter.tracked_keys().await, 1);
}

#[tokio::test]
async fn test_reset_forgets_history() {
    let (limiter, _clock) = limiter(1, 60);

    assert!(limiter.allow("k").await);
    assert!(!limiter.allow("k").await);

    limiter.reset("k").await;
    assert!(limiter.allow("k").await);
}

#[tokio::test]
async fn test_disabled_config_admits_everything() {
    let config = RateLimitConfig {
        enabled: false,
        limit: 1,
        window_seconds: 60,
    };
    let limiter = SlidingWindowLimiter::from_config(&config, Arc::new(ManualClock::starting_now()));

    for _ in 0..20 {
        assert!(limiter.allow("k").await);
    }
    assert_eq!(limiter.tracked_keys().await, 0);
}

#[tokio::test]
async fn test_from_config_uses_configured_window() {
    let limiter = SlidingWindowLimiter::from_config(
        &RateLimitConfig::default(),
        Arc::new(ManualClock::starting_now()),
    );

    assert_eq!(limiter.limit(), 10);
    assert_eq!(limiter.window(), Duration::seconds(60));
}

#[tokio::test]
async fn test_oversized_window_saturates_at_time_range_edge() {
    let config = RateLimitConfig {
        enabled: true,
        limit: 3,
        window_seconds: 10_000_000_000_000,
    };
    let clock = Arc::new(ManualClock::starting_now());
    let limiter = SlidingWindowLimiter::from_config(&config, clock.clone());

    for _ in 0..3 {
        assert!(limiter.allow("k").await);
    }
    match limiter.check("k").await {
        Err(CredentialError::RateLimited {
            retry_after_seconds,
        }) => assert!(retry_after_seconds > 365 * 24 * 3600),
        other => panic!("expected RateLimited, got {other:?}"),
    }

    clock.advance(Duration::days(365 * 1000));
    assert!(!limiter.allow("k").await);
    assert_eq!(limiter.purge_idle().await, 0);
    assert_eq!(limiter.tracked_keys().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_never_exceed_limit() {
    let limiter = Arc::new(SlidingWindowLimiter::new(10, Duration::seconds(60)));

    let mut handles = Vec::new();
    for _ in 0..50 {
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move { limiter.allow("shared").await }));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 10);
}
