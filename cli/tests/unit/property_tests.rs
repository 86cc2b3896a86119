//! Property-based tests for name validation and argument synthesis.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use sctl_cli::domain::service::{ENV_FLAG, substitute_env_arg_with};
use sctl_cli::domain::{ServiceSpec, validate_config_key, validate_service_name};

// ============================================================================
// validate_service_name() property tests
// ============================================================================

proptest! {
    /// Names built from the allowed alphabet are accepted.
    #[test]
    fn prop_safe_names_accepted(name in "[A-Za-z0-9][A-Za-z0-9_.-]{0,40}") {
        prop_assert!(validate_service_name(&name).is_ok());
    }

    /// Anything containing a path separator is rejected.
    #[test]
    fn prop_names_with_separators_rejected(
        head in "[a-z]{1,10}",
        tail in "[a-z]{1,10}",
        sep in prop::sample::select(vec!["/", "\\"]),
    ) {
        let name = format!("{head}{sep}{tail}");
        prop_assert!(validate_service_name(&name).is_err());
    }
}

#[test]
fn test_traversal_names_rejected() {
    for name in ["", "..", "../etc/passwd", ".hidden", "-rf", "a b"] {
        assert!(validate_service_name(name).is_err(), "accepted {name:?}");
    }
}

// ============================================================================
// Argument synthesis property tests
// ============================================================================

proptest! {
    /// Every surviving env entry is emitted as exactly one flag/value pair.
    #[test]
    fn prop_env_args_come_in_pairs(
        entries in prop::collection::vec("[A-Z]{1,8}=[a-z0-9]{0,8}", 0..8),
    ) {
        let spec = ServiceSpec {
            name: "svc".to_string(),
            image: "img".to_string(),
            env_args: entries.clone(),
            keyword_args: Vec::new(),
        };
        let args = spec.resolve_env_args();
        prop_assert_eq!(args.len(), entries.len() * 2);
        for pair in args.chunks(2) {
            prop_assert_eq!(pair[0].as_str(), ENV_FLAG);
        }
    }

    /// Keyword entries expand to their whitespace-separated tokens, in order.
    #[test]
    fn prop_keyword_args_flatten_in_order(
        entries in prop::collection::vec(prop::collection::vec("[a-z0-9:-]{1,6}", 1..4), 0..5),
    ) {
        let joined: Vec<String> = entries.iter().map(|tokens| tokens.join("  ")).collect();
        let spec = ServiceSpec {
            name: "svc".to_string(),
            image: "img".to_string(),
            env_args: Vec::new(),
            keyword_args: joined,
        };
        let expected: Vec<String> = entries.into_iter().flatten().collect();
        prop_assert_eq!(spec.resolve_keyword_args(), expected);
    }

    /// Values without the sigil are never touched, whatever the environment holds.
    #[test]
    fn prop_values_without_sigil_pass_through(value in "[A-Za-z0-9_=:/.-]{0,20}") {
        let out = substitute_env_arg_with(&value, |_| Some("REPLACED".to_string()));
        prop_assert_eq!(out, value);
    }

    /// Arbitrary keys (not in whitelist) are rejected.
    #[test]
    fn prop_arbitrary_config_keys_rejected(key in "[a-z]{1,20}\\.[a-z]{1,20}") {
        prop_assume!(key != "remote.user" && key != "services.dir");
        prop_assert!(validate_config_key(&key).is_err());
    }
}
