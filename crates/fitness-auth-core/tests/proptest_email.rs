//! Property-based tests for input validation

use fitness_auth_core::is_valid_email;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_no_at_sign_is_invalid(s in "[a-zA-Z0-9._-]{0,40}") {
        prop_assert!(!is_valid_email(&s));
    }

    #[test]
    fn prop_simple_addresses_are_valid(
        local in "[a-z0-9]{1,16}",
        host in "[a-z0-9]{1,16}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{local}@{host}.{tld}");
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn prop_whitespace_is_invalid(
        local in "[a-z]{1,8}",
        host in "[a-z]{1,8}",
    ) {
        let email = format!("{local} x@{host}.fr");
        prop_assert!(!is_valid_email(&email));
    }
}
