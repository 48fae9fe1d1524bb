//! Thin wrapper around a `governor` direct rate limiter, used to throttle
//! outbound profile fetches during warm-up to a fixed rate per second.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::{Quota, RateLimiter};

type Inner = RateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A token-bucket limiter admitting `rate_per_sec` permits per second,
/// burst size 1. `acquire` suspends the calling task (not the OS
/// thread) until a permit is available; under steady load no requester
/// starves, since governor serves requests in arrival order.
pub struct PermitLimiter {
    inner: Inner,
}

impl PermitLimiter {
    pub fn new(rate_per_sec: f64) -> Self {
        let rate_per_sec = if rate_per_sec > 0.0 { rate_per_sec } else { 1.0 };
        let period = Duration::from_secs_f64(1.0 / rate_per_sec);
        let one = NonZeroU32::new(1).unwrap();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(one))
            .allow_burst(one);

        Self {
            inner: RateLimiter::direct(quota),
        }
    }

    pub async fn acquire(&self) {
        self.inner.until_ready().await;
    }
}
