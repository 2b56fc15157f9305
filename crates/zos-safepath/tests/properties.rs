//! Property tests for rule set composition.

use proptest::prelude::*;
use zos_safepath::{validate_path, validate_segment, ErrorKind, RuleSet};

fn rule_set() -> impl Strategy<Value = RuleSet> {
    any::<u8>().prop_map(RuleSet::from_bits_truncate)
}

/// Segments biased toward the characters the rules care about.
fn segment() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..12),
        "[-~.a-zA-Z0-9 :$*\\\\]{0,10}".prop_map(String::into_bytes),
        "(con|nul|lpt1|com9|CON|Nul)(\\.[a-z]{1,3}){0,2}".prop_map(String::into_bytes),
    ]
}

proptest! {
    #[test]
    fn prop_stricter_rules_only_reject_more(a in rule_set(), b in rule_set(), name in segment()) {
        let strict = a | b;
        if validate_segment(strict, &name).is_ok() {
            prop_assert!(validate_segment(a, &name).is_ok());
            prop_assert!(validate_segment(b, &name).is_ok());
        }
    }

    #[test]
    fn prop_constraints_are_conjunctive(a in rule_set(), b in rule_set(), name in segment()) {
        let both = validate_segment(a, &name).is_ok() && validate_segment(b, &name).is_ok();
        prop_assert_eq!(validate_segment(a | b, &name).is_ok(), both);
    }

    #[test]
    fn prop_checks_are_idempotent(rules in rule_set(), name in segment()) {
        prop_assert_eq!(validate_segment(rules, &name), validate_segment(rules, &name));
        prop_assert_eq!(validate_path(rules, &name), validate_path(rules, &name));
    }

    #[test]
    fn prop_null_byte_always_rejected(rules in rule_set(), mut name in segment(), at in any::<prop::sample::Index>()) {
        let i = at.index(name.len() + 1);
        name.insert(i, 0);
        prop_assert!(validate_segment(rules, &name).is_err());
    }

    #[test]
    fn prop_separator_rejected_in_segments(rules in rule_set(), mut name in segment(), at in any::<prop::sample::Index>()) {
        let i = at.index(name.len() + 1);
        name.insert(i, b'/');
        prop_assert!(validate_segment(rules, &name).is_err());
    }

    #[test]
    fn prop_single_segment_path_agrees(rules in rule_set(), name in segment()) {
        prop_assume!(!name.contains(&b'/'));
        let as_path = validate_path(rules, &name);
        let as_segment = validate_segment(rules, &name);
        match (&as_path, &as_segment) {
            (Ok(()), Ok(())) => {}
            (Err(p), Err(s)) => {
                if !name.is_empty() {
                    prop_assert_eq!(p.kind(), s.kind());
                    prop_assert!(p.is_path_error());
                } else {
                    prop_assert_eq!(p.kind(), &ErrorKind::EmptyPath);
                }
            }
            _ => prop_assert!(false, "path {:?} vs segment {:?}", as_path, as_segment),
        }
    }

    #[test]
    fn prop_joined_segments_pass_together(rules in rule_set(), a in segment(), b in segment()) {
        prop_assume!(!a.contains(&b'/') && !b.contains(&b'/'));
        let mut joined = a.clone();
        joined.push(b'/');
        joined.extend_from_slice(&b);
        let each = validate_segment(rules, &a).is_ok() && validate_segment(rules, &b).is_ok();
        prop_assert_eq!(validate_path(rules, &joined).is_ok(), each);
    }
}
