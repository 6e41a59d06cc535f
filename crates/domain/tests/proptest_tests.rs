//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::{Duration, TimeZone, Utc};
use domain::value_objects::{EventId, OtpCode};
use domain::{Countdown, Route, RouteGuard};
use proptest::prelude::*;

// ============================================================================
// OtpCode Property Tests
// ============================================================================

mod otp_code_tests {
    use super::*;

    proptest! {
        #[test]
        fn four_digits_always_accepted(code in "[0-9]{4}") {
            let otp = OtpCode::new(&code).unwrap();
            prop_assert_eq!(otp.as_str(), code.as_str());
        }

        #[test]
        fn other_lengths_rejected(code in "[0-9]{0,3}|[0-9]{5,8}") {
            prop_assert!(OtpCode::new(&code).is_err());
        }

        #[test]
        fn any_non_digit_rejected(prefix in "[0-9]{0,3}", bad in "[a-zA-Z ._-]") {
            let mut code = prefix;
            code.push_str(&bad);
            while code.chars().count() < 4 {
                code.push('0');
            }
            prop_assert!(OtpCode::new(&code).is_err());
        }
    }
}

// ============================================================================
// EventId Property Tests
// ============================================================================

mod event_id_tests {
    use super::*;

    proptest! {
        #[test]
        fn slug_ids_are_kept(id in "[a-zA-Z0-9_-]{1,36}") {
            let event_id = EventId::new(format!("  {id} ")).unwrap();
            prop_assert_eq!(event_id.as_str(), id.as_str());
        }

        #[test]
        fn path_characters_rejected(
            head in "[a-z0-9]{1,8}",
            sep in "[/?#]",
            tail in "[a-z0-9]{1,8}"
        ) {
            let raw = format!("{head}{sep}{tail}");
            prop_assert!(EventId::new(raw).is_err());
        }
    }
}

// ============================================================================
// Countdown Property Tests
// ============================================================================

mod countdown_tests {
    use super::*;

    proptest! {
        #[test]
        fn parts_recompose_to_the_remaining_seconds(secs in 1i64..10_000_000) {
            let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            let c = Countdown::until(now + Duration::seconds(secs), now);

            prop_assert!(!c.complete);
            prop_assert!((0..24).contains(&c.hours));
            prop_assert!((0..60).contains(&c.minutes));
            prop_assert!((0..60).contains(&c.seconds));
            prop_assert_eq!(c.days * 86_400 + c.hours * 3_600 + c.minutes * 60 + c.seconds, secs);
        }

        #[test]
        fn past_targets_are_complete(secs in 0i64..10_000_000) {
            let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
            let c = Countdown::until(now - Duration::seconds(secs), now);
            prop_assert!(c.complete);
        }
    }
}

// ============================================================================
// Route Property Tests
// ============================================================================

mod route_tests {
    use super::*;

    fn any_route() -> impl Strategy<Value = Route> {
        prop::sample::select(Route::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn signed_out_users_never_reach_protected_pages(route in any_route()) {
            let landed = RouteGuard::resolve(route, false);
            prop_assert!(!landed.requires_session());
        }

        #[test]
        fn signed_in_users_land_where_they_asked(route in any_route()) {
            prop_assume!(route != Route::Root);
            prop_assert_eq!(RouteGuard::resolve(route, true), route);
        }

        #[test]
        fn trailing_slash_is_ignored(route in any_route()) {
            prop_assume!(route != Route::Root);
            let parsed: Route = format!("{route}/").parse().unwrap();
            prop_assert_eq!(parsed, route);
        }
    }
}
