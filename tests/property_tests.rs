//! Property-based coverage of the search-spec hash: generated specs drive
//! the same invariants the unit tests in `spec/search_spec.rs` pin down
//! with fixed values — reversal is an involution on the hash, `format`
//! never affects it, and the hash itself is a pure function of a spec's
//! content.

use proptest::prelude::*;

use causal_path_search::spec::Sign;
use causal_path_search::SearchSpec;

fn arb_node_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Z0-9]{1,7}"
}

fn arb_sign() -> impl Strategy<Value = Option<Sign>> {
    prop_oneof![
        Just(None),
        Just(Some(Sign::Plus)),
        Just(Some(Sign::Minus)),
    ]
}

/// A spec built entirely from generated fields, always with at least one
/// endpoint set (the one invariant `SearchSpec::new`/`from_json` enforce).
fn arb_spec() -> impl Strategy<Value = SearchSpec> {
    (
        arb_node_name(),
        arb_node_name(),
        prop::collection::vec("[a-z]{3,12}", 0..=4),
        prop::collection::vec("[a-z]{2,6}", 0..=3),
        prop::collection::vec(any::<i64>(), 0..=3),
        any::<bool>(),
        arb_sign(),
        1u32..=6,
        prop::option::of(0.0f64..=1.0f64),
    )
        .prop_map(
            |(source, target, stmt_filter, allowed_ns, hash_blacklist, weighted, sign, depth_limit, belief_cutoff)| {
                let mut spec = SearchSpec::new(Some(source), Some(target)).unwrap();
                spec.stmt_filter = stmt_filter;
                spec.allowed_ns = allowed_ns;
                spec.edge_hash_blacklist = hash_blacklist;
                spec.weighted = weighted;
                spec.sign = sign;
                spec.depth_limit = depth_limit;
                spec.belief_cutoff = belief_cutoff;
                spec
            },
        )
}

proptest! {
    /// Reversal is an involution: reversing twice always restores the
    /// original endpoints and therefore the original hash, no matter what
    /// the rest of the fields look like.
    #[test]
    fn prop_reverse_reverse_hash_is_identity(spec in arb_spec()) {
        prop_assert_eq!(spec.hash(), spec.reverse().reverse().hash());
    }

    /// `format` is an output-rendering hint, not query content — varying it
    /// alone must never change the hash.
    #[test]
    fn prop_format_never_affects_hash(spec in arb_spec(), a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let mut with_a = spec.clone();
        with_a.format = Some(a);
        let mut with_b = spec.clone();
        with_b.format = Some(b);
        prop_assert_eq!(with_a.hash(), with_b.hash());
    }

    /// The hash is a pure function of a spec's serialized content: two
    /// independently constructed specs with identical fields hash equal,
    /// and cloning never perturbs it.
    #[test]
    fn prop_hash_is_deterministic_and_clone_stable(spec in arb_spec()) {
        let cloned = spec.clone();
        prop_assert_eq!(spec.hash(), cloned.hash());
        prop_assert_eq!(spec.hash(), spec.hash());
    }

    /// Swapping source and target (without a full double-reverse) changes
    /// the hash whenever the two endpoints actually differ — the hash is
    /// sensitive to which side is source vs. target, not just the set of
    /// named endpoints.
    #[test]
    fn prop_single_reverse_changes_hash_when_endpoints_differ(spec in arb_spec()) {
        prop_assume!(spec.source != spec.target);
        prop_assert_ne!(spec.hash(), spec.reverse().hash());
    }
}
