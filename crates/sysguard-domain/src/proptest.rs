//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Merge never deduplicating rule ids
//! - Glob matching of literal text and wildcards
//! - Normalizer equivalence of the two variant shapes
//! - Report shape (Controlled key presence, summary dedup)

use crate::aggregate::aggregate;
use crate::evaluate::{ClassifiedResult, evaluate};
use crate::glob::glob_match;
use crate::host::select_variant;
use crate::normalize::normalize_value;
use crate::policy::Rollup;
use crate::store::RuleStore;
use crate::test_support::{FakeLookup, entry, index_of};
use proptest::prelude::*;
use serde_json::{Map, Value, json};
use std::collections::BTreeSet;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

/// Strategy for rule ids and parameter names (no glob metacharacters).
fn arb_ident() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_.]{0,23}").unwrap()
}

/// Strategy for OS fingerprints such as `CentOS Linux-7`.
fn arb_host() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][A-Za-z]{2,10}( Linux)?-[0-9]{1,2}").unwrap()
}

/// Strategy for audit tags.
fn arb_tag() -> impl Strategy<Value = String> {
    prop::string::string_regex("CIS-[0-9]\\.[0-9]{1,2}(\\.[0-9])?").unwrap()
}

/// Strategy for a rule document with the given number of unique rule ids.
fn arb_document() -> impl Strategy<Value = (Value, usize)> {
    prop::collection::btree_set(arb_ident(), 0..8).prop_map(|ids| {
        let section: Map<String, Value> = ids
            .iter()
            .map(|id| (id.clone(), json!({"data": {"*": []}, "description": id})))
            .collect();
        (json!({ "sysctl": section }), ids.len())
    })
}

/// Strategy for a list of distinct `(checkName, tag)` pairs.
fn arb_checks() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map(arb_ident(), arb_tag(), 0..6)
        .prop_map(|m| m.into_iter().collect())
}

// ============================================================================
// Merge
// ============================================================================

proptest! {
    #[test]
    fn merge_length_is_sum_of_rule_counts(
        (d1, n1) in arb_document(),
        (d2, n2) in arb_document(),
        p1 in proptest::option::of(arb_ident()),
        p2 in proptest::option::of(arb_ident()),
    ) {
        let mut store = RuleStore::new();
        store.merge(&d1, p1.as_deref());
        store.merge(&d2, p2.as_deref());
        prop_assert_eq!(store.len(), n1 + n2);
    }

    #[test]
    fn merged_profile_matches_source_document(
        (d1, n1) in arb_document(),
        p1 in arb_ident(),
    ) {
        let mut store = RuleStore::new();
        store.merge(&d1, Some(p1.as_str()));
        prop_assert_eq!(store.len(), n1);
        for rule in store.rules() {
            prop_assert_eq!(rule.definition["nova_profile"].as_str(), Some(p1.as_str()));
        }
    }
}

// ============================================================================
// Glob
// ============================================================================

proptest! {
    #[test]
    fn literal_text_matches_itself(host in arb_host()) {
        prop_assert!(glob_match(&host, &host));
    }

    #[test]
    fn star_matches_everything(text in ".*") {
        prop_assert!(glob_match(&text, "*"));
    }

    #[test]
    fn prefix_star_matches_extensions(host in arb_host(), suffix in "[a-z0-9 .-]{0,8}") {
        let text = format!("{host}{suffix}");
        let pattern = format!("{host}*");
        prop_assert!(glob_match(&text, &pattern));
    }

    #[test]
    fn matching_is_anchored(host in arb_host()) {
        let padded = format!("x{host}");
        prop_assert!(!glob_match(&padded, &host));
    }
}

// ============================================================================
// Host selection and normalization
// ============================================================================

proptest! {
    #[test]
    fn exact_host_key_is_selected_over_fallback(host in arb_host(), other in arb_host()) {
        prop_assume!(host != other);
        let patterns: Map<String, Value> = [
            (other.clone(), json!("other")),
            (host.clone(), json!("mine")),
            ("*".to_string(), json!("fallback")),
        ]
        .into_iter()
        .collect();
        let selected = select_variant(Some(host.as_str()), &patterns).expect("selected");
        prop_assert_eq!(selected.variant, &json!("mine"));
    }

    #[test]
    fn list_and_map_shapes_normalize_to_same_pairs(checks in arb_checks()) {
        let list: Vec<Value> = checks
            .iter()
            .map(|(name, tag)| json!({ name.as_str(): {"tag": tag, "match_output": "1"} }))
            .collect();
        let map: Map<String, Value> = checks
            .iter()
            .map(|(name, tag)| (name.clone(), json!({"tag": tag, "match_output": "1"})))
            .collect();

        let from_list = normalize_value("*", &Value::Array(list)).expect("list");
        let from_map = normalize_value("*", &Value::Object(map)).expect("map");
        prop_assert_eq!(from_list.len(), checks.len());
        prop_assert_eq!(from_list, from_map);
    }
}

// ============================================================================
// Evaluation and aggregation
// ============================================================================

proptest! {
    #[test]
    fn controlled_key_present_iff_controlled_results(
        checks in arb_checks(),
        controlled in prop::collection::vec(any::<bool>(), 6),
    ) {
        let entries = checks
            .iter()
            .zip(controlled.iter())
            .map(|((name, tag), &is_controlled)| {
                let e = entry(name, tag, "1");
                if is_controlled { e.with_attr("control", "waived") } else { e }
            })
            .collect::<Vec<_>>();
        let any_controlled = entries.iter().any(|e| e.is_controlled());
        let lookup = FakeLookup::new(&[]);
        let classified = evaluate(&index_of(entries), "*", &lookup, Rollup::LastSeen);
        let report = aggregate(classified, false);

        let value = serde_json::to_value(&report).expect("json");
        prop_assert_eq!(value.get("Controlled").is_some(), any_controlled);
    }

    #[test]
    fn summary_items_are_unique_per_tag_and_description(
        tags in prop::collection::vec(arb_tag(), 0..12),
        verbose in any::<bool>(),
    ) {
        let classified: Vec<ClassifiedResult> = tags
            .iter()
            .map(|tag| ClassifiedResult::Failure(entry("kernel.x", tag, "1").with_attr("description", "d")))
            .collect();
        let distinct: BTreeSet<&String> = tags.iter().collect();
        let report = aggregate(classified, verbose);
        if verbose {
            prop_assert_eq!(report.failure.len(), tags.len());
        } else {
            prop_assert_eq!(report.failure.len(), distinct.len());
        }
    }
}
