//! Interval poller for conditions that are evaluated rather than signaled.
//!
//! The predicate is checked up to `ceil(timeout / interval)` times, with
//! one delay between consecutive checks. Polling trades CPU efficiency for
//! not requiring the condition to notify; prefer a signaled primitive
//! (flag, event group) whenever the producer can cooperate.

use core::time::Duration;

/// Polls `predicate` every `interval` until it holds or the `timeout`
/// budget is spent.
///
/// `delayer` performs the inter-check wait; injecting it keeps the schedule
/// testable and lets each backend supply its own sleep. The predicate is
/// evaluated before every delay, so a condition that already holds costs no
/// delay, and a zero `timeout` performs no evaluation at all.
///
/// # Panics
///
/// Panics if `interval` is zero.
pub fn poll_with<D, P>(
    interval: Duration,
    timeout: Duration,
    mut delayer: D,
    mut predicate: P,
) -> bool
where
    D: FnMut(Duration),
    P: FnMut() -> bool,
{
    assert!(!interval.is_zero(), "poll interval must be non-zero");
    for _ in 0..attempts(interval, timeout) {
        if predicate() {
            return true;
        }
        delayer(interval);
    }
    false
}

/// Number of checks a timeout budget affords: `ceil(timeout / interval)`.
fn attempts(interval: Duration, timeout: Duration) -> u128 {
    let interval = interval.as_nanos();
    let timeout = timeout.as_nanos();
    timeout / interval + u128::from(timeout % interval != 0)
}
