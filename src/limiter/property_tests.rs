//! Property-Based Tests for Rate Limiter Module

use proptest::prelude::*;

use crate::clock::ManualClock;
use crate::limiter::{LimitConfig, LimitProfile, RateLimiter};

fn test_limiter() -> (RateLimiter<ManualClock>, ManualClock) {
    let clock = ManualClock::new(1_700_000_000_000);
    (
        RateLimiter::with_clock(LimitProfile::GeneralApi.config(), clock.clone()),
        clock,
    )
}

fn config_strategy() -> impl Strategy<Value = LimitConfig> {
    (1u64..100_000, 1u32..50).prop_map(|(window_ms, max_requests)| {
        LimitConfig::new(window_ms, max_requests)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Within one window exactly max_requests checks are admitted, and
    // remaining counts down to zero without wrapping.
    #[test]
    fn prop_admits_exactly_max_requests(
        config in config_strategy(),
        extra in 0u32..20
    ) {
        let (mut limiter, _) = test_limiter();
        let total = config.max_requests + extra;

        let decisions: Vec<_> = (0..total).map(|_| limiter.check("k", config)).collect();

        let admitted = decisions.iter().filter(|d| d.allowed).count() as u32;
        prop_assert_eq!(admitted, config.max_requests);
        for (i, decision) in decisions.iter().enumerate() {
            let count = i as u32 + 1;
            prop_assert_eq!(decision.allowed, count <= config.max_requests);
            prop_assert_eq!(decision.remaining, config.max_requests.saturating_sub(count));
        }
        prop_assert_eq!(limiter.status("k").map(|e| e.count), Some(total));
    }

    // Exhausting one key leaves every other key untouched.
    #[test]
    fn prop_keys_are_independent(
        config in config_strategy(),
        other in "[a-z]{1,8}"
    ) {
        prop_assume!(other != "k1");
        let (mut limiter, _) = test_limiter();

        for _ in 0..=config.max_requests {
            limiter.check("k1", config);
        }

        let decision = limiter.check(&other, config);
        prop_assert!(decision.allowed);
        prop_assert_eq!(decision.remaining, config.max_requests - 1);
    }

    // Once the window has ended the next check opens a fresh one.
    #[test]
    fn prop_window_resets_after_expiry(
        config in config_strategy(),
        overshoot in 1u64..10_000
    ) {
        let (mut limiter, clock) = test_limiter();

        let first = limiter.check("k", config);
        for _ in 0..config.max_requests {
            limiter.check("k", config);
        }
        prop_assert!(!limiter.check("k", config).allowed);

        clock.advance(config.window_ms + overshoot);
        let fresh = limiter.check("k", config);

        prop_assert!(fresh.allowed);
        prop_assert_eq!(fresh.remaining, config.max_requests - 1);
        prop_assert_eq!(fresh.reset_time, first.reset_time + config.window_ms + overshoot);
    }

    // Profile resolution is stable for the lifetime of the process.
    #[test]
    fn prop_profile_resolution_is_stable(index in 0usize..LimitProfile::ALL.len()) {
        let profile = LimitProfile::ALL[index];
        let first = profile.name().parse::<LimitProfile>().map(|p| p.config());
        let second = profile.name().parse::<LimitProfile>().map(|p| p.config());

        prop_assert_eq!(first.clone(), Ok(profile.config()));
        prop_assert_eq!(first, second);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_checks_then_new_window() {
        let (mut limiter, clock) = test_limiter();
        let config = LimitConfig::new(1_000, 2);

        let allowed: Vec<bool> = (0..3)
            .map(|_| {
                clock.advance(10);
                limiter.check("k", config).allowed
            })
            .collect();
        assert_eq!(allowed, vec![true, true, false]);

        let first_reset = limiter.status("k").map(|e| e.reset_time);
        clock.advance(1_000);
        let fourth = limiter.check("k", config);

        assert!(fourth.allowed);
        assert_ne!(Some(fourth.reset_time), first_reset);
    }
}
