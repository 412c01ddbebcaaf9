//! Leaf-level merge of a candidate tree against base and target locales.

use crate::tree::{
    TreeMap,
    ValueTree,
};

/// Merges `candidate` with the leaves of `base` and `target`.
///
/// Walks the candidate; its shape is the shape of the result. For each leaf
/// the target locale's value wins when it is present and not empty (see
/// [`Leaf::is_empty`](crate::tree::Leaf::is_empty)), otherwise the base
/// locale's value, otherwise the candidate's own value.
///
/// Nodes are only descended when `base` has a node at the same key; a subtree
/// without a base counterpart passes through untouched. A target that lacks a
/// subtree the base has is treated as empty there, so those leaves fall back
/// to base. Values of the wrong kind (a node where the candidate has a leaf)
/// are never substituted.
///
/// # Examples
/// ```
/// use ml_nested_form::locker::merge_leaves;
/// use ml_nested_form::tree::ValueTree;
/// use serde_json::json;
///
/// let candidate = ValueTree::from(json!([{"title": "Hello", "qty": 0}]));
/// let base = candidate.clone();
/// let target = ValueTree::from(json!([{"title": ""}]));
///
/// let merged = merge_leaves(&candidate, &base, &target);
/// assert_eq!(merged.to_json(), json!([{"title": "Hello", "qty": 0}]));
/// ```
#[must_use]
pub fn merge_leaves(candidate: &ValueTree, base: &ValueTree, target: &ValueTree) -> ValueTree {
    let ValueTree::Node(children) = candidate else {
        return candidate.clone();
    };

    let empty = ValueTree::empty();
    let merged: TreeMap = children
        .iter()
        .map(|(key, value)| {
            let base_value = base.as_node().and_then(|children| children.get(key));
            let target_value = target.as_node().and_then(|children| children.get(key));

            let merged_value = match value {
                ValueTree::Node(_) => match base_value {
                    Some(base_child @ ValueTree::Node(_)) => {
                        let target_child = match target_value {
                            Some(child @ ValueTree::Node(_)) => child,
                            _ => &empty,
                        };
                        merge_leaves(value, base_child, target_child)
                    }
                    _ => value.clone(),
                },
                ValueTree::Leaf(_) => match (target_value, base_value) {
                    (Some(ValueTree::Leaf(leaf)), _) if !leaf.is_empty() => {
                        ValueTree::Leaf(leaf.clone())
                    }
                    (_, Some(ValueTree::Leaf(leaf))) => ValueTree::Leaf(leaf.clone()),
                    _ => value.clone(),
                },
            };

            (key.clone(), merged_value)
        })
        .collect();

    ValueTree::Node(merged)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::{
        Value,
        json,
    };

    use super::*;

    fn tree(value: Value) -> ValueTree {
        ValueTree::from(value)
    }

    #[googletest::test]
    fn merges_translated_items_with_base_fallback() {
        let candidate = tree(json!([{"title": "Hello", "qty": 0}, {"title": "World", "qty": 5}]));
        let base = candidate.clone();
        let target = tree(json!([{"title": "Bonjour"}, {"title": "", "qty": 0}]));

        let merged = merge_leaves(&candidate, &base, &target);

        expect_that!(
            merged.to_json(),
            eq(&json!([{"title": "Bonjour", "qty": 0}, {"title": "World", "qty": 0}]))
        );
    }

    #[googletest::test]
    fn zero_posted_as_string_falls_back_to_base() {
        let candidate = tree(json!([{"qty": "5"}]));
        let target = tree(json!([{"qty": "0"}]));

        let merged = merge_leaves(&candidate, &candidate, &target);

        expect_that!(merged.to_json(), eq(&json!([{"qty": "5"}])));
    }

    #[rstest]
    #[case::empty_string(json!(""), json!("base"))]
    #[case::null(json!(null), json!("base"))]
    #[case::false_(json!(false), json!("base"))]
    #[case::zero(json!(0), json!(0))]
    #[case::float_zero(json!(0.0), json!(0.0))]
    #[case::string_zero(json!("0"), json!("base"))]
    #[case::true_(json!(true), json!(true))]
    #[case::text(json!("cible"), json!("cible"))]
    fn leaf_preference(#[case] target_leaf: Value, #[case] expected: Value) {
        let candidate = tree(json!({"field": "candidate"}));
        let base = tree(json!({"field": "base"}));
        let target = tree(json!({ "field": target_leaf }));

        let merged = merge_leaves(&candidate, &base, &target);

        assert_that!(merged.to_json(), eq(&json!({ "field": expected })));
    }

    #[googletest::test]
    fn leaf_missing_everywhere_keeps_candidate() {
        let candidate = tree(json!({"only_here": "candidate"}));

        let merged = merge_leaves(&candidate, &tree(json!({})), &tree(json!({})));

        expect_that!(merged, eq(&candidate));
    }

    #[googletest::test]
    fn empty_base_leaf_still_wins_over_candidate() {
        let candidate = tree(json!({"title": "live"}));
        let base = tree(json!({"title": ""}));

        let merged = merge_leaves(&candidate, &base, &tree(json!({})));

        expect_that!(merged.to_json(), eq(&json!({"title": ""})));
    }

    #[googletest::test]
    fn subtree_without_base_key_passes_through() {
        let candidate = tree(json!({"meta": {"slug": "live"}}));
        let base = tree(json!({}));
        let target = tree(json!({"meta": {"slug": "cible"}}));

        let merged = merge_leaves(&candidate, &base, &target);

        expect_that!(merged, eq(&candidate));
    }

    #[googletest::test]
    fn missing_target_subtree_falls_back_to_base() {
        let candidate = tree(json!([{"title": "live", "links": [{"label": "live"}]}]));
        let base = tree(json!([{"title": "Hello", "links": [{"label": "Home"}]}]));
        let target = tree(json!([{"title": "Bonjour"}]));

        let merged = merge_leaves(&candidate, &base, &target);

        expect_that!(
            merged.to_json(),
            eq(&json!([{"title": "Bonjour", "links": [{"label": "Home"}]}]))
        );
    }

    #[googletest::test]
    fn node_in_target_never_replaces_a_leaf() {
        let candidate = tree(json!({"title": "live"}));
        let base = tree(json!({"title": "Hello"}));
        let target = tree(json!({"title": {"nested": "x"}}));

        let merged = merge_leaves(&candidate, &base, &target);

        expect_that!(merged.to_json(), eq(&json!({"title": "Hello"})));
    }

    #[googletest::test]
    fn leaf_in_base_does_not_break_candidate_subtree() {
        let candidate = tree(json!({"links": [{"label": "live"}]}));
        let base = tree(json!({"links": "not a list"}));

        let merged = merge_leaves(&candidate, &base, &tree(json!({})));

        expect_that!(merged, eq(&candidate));
    }

    #[googletest::test]
    fn bare_leaf_candidate_is_returned_as_is() {
        let candidate = tree(json!("plain"));

        let merged = merge_leaves(&candidate, &tree(json!("base")), &tree(json!("target")));

        expect_that!(merged, eq(&candidate));
    }

    #[googletest::test]
    fn extra_keys_in_overrides_are_ignored() {
        let candidate = tree(json!([{"title": "Hello"}]));
        let base = tree(json!([{"title": "Hello"}, {"title": "Ghost"}]));
        let target = tree(json!([{"title": "Bonjour", "extra": "x"}]));

        let merged = merge_leaves(&candidate, &base, &target);

        expect_that!(merged.to_json(), eq(&json!([{"title": "Bonjour"}])));
    }
}
