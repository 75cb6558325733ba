use governor::clock::{Clock, DefaultClock};
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::thread;

pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// One limiter shared by every outbound call.
pub fn limiter_per_minute(requests: NonZeroU32) -> Limiter {
    Arc::new(RateLimiter::direct(Quota::per_minute(requests)))
}

/// Blocks the calling thread until the limiter admits one more call.
pub fn wait_for(limiter: &Limiter) {
    let clock = DefaultClock::default();
    while let Err(not_until) = limiter.check() {
        let delay = not_until.wait_time_from(clock.now());
        log::debug!("Rate limited, waiting {:?} before next request", delay);
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admits_calls_within_quota() {
        let limiter = limiter_per_minute(NonZeroU32::new(3).unwrap());
        wait_for(&limiter);
        wait_for(&limiter);
        wait_for(&limiter);
        assert!(limiter.check().is_err());
    }
}
