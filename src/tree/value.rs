//! Typed value tree shared by every locale view of a nested field.

use std::fmt;

use indexmap::IndexMap;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use serde_json::{
    Map,
    Number,
    Value,
};

/// Key of a child inside a [`ValueTree::Node`].
///
/// Structural positions (item indices) and field names are both plain keys;
/// the merge treats them the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TreeKey {
    Index(usize),
    Name(String),
}

impl TreeKey {
    /// Builds a key from a raw object key.
    ///
    /// Canonical non-negative integers (`"0"`, `"12"`, but not `"01"` or
    /// `"-1"`) become [`TreeKey::Index`], so an object posted with numeric
    /// keys lines up with a JSON array of the same items.
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let canonical = raw == "0" || (!raw.starts_with('0') && !raw.is_empty());
        if canonical
            && raw.bytes().all(|b| b.is_ascii_digit())
            && let Ok(index) = raw.parse()
        {
            return Self::Index(index);
        }
        Self::Name(raw.to_string())
    }
}

impl fmt::Display for TreeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for TreeKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for TreeKey {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

/// Scalar at the bottom of a [`ValueTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaf {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
}

impl Leaf {
    /// Whether this leaf counts as "not supplied" for a locale override.
    ///
    /// `null`, `false`, `""` and `"0"` are empty. Numbers never are, so an
    /// explicit numeric `0` is kept as a translated value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null | Self::Bool(false) => true,
            Self::String(s) => s.is_empty() || s == "0",
            Self::Bool(true) | Self::Number(_) => false,
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null | Self::Bool(false) => Ok(()),
            Self::Bool(true) => f.write_str("1"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// Children of a node, in posted order.
pub type TreeMap = IndexMap<TreeKey, ValueTree>;

/// One locale's (or the canonical) view of a nested field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueTree {
    Leaf(Leaf),
    Node(TreeMap),
}

impl Default for ValueTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl ValueTree {
    /// A node without children.
    #[must_use]
    pub fn empty() -> Self {
        Self::Node(TreeMap::new())
    }

    #[must_use]
    pub const fn as_node(&self) -> Option<&TreeMap> {
        match self {
            Self::Node(children) => Some(children),
            Self::Leaf(_) => None,
        }
    }

    /// Empty leaf or a node without children.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Leaf(leaf) => leaf.is_empty(),
            Self::Node(children) => children.is_empty(),
        }
    }

    /// Renumbers a list of items densely from zero, keeping their order.
    ///
    /// Only applies when every top-level key is an index; named nodes and
    /// leaves are returned unchanged.
    #[must_use]
    pub fn reindexed(self) -> Self {
        match self {
            Self::Node(children)
                if children.keys().all(|key| matches!(key, TreeKey::Index(_))) =>
            {
                Self::Node(
                    children
                        .into_values()
                        .enumerate()
                        .map(|(index, child)| (TreeKey::Index(index), child))
                        .collect(),
                )
            }
            other => other,
        }
    }

    /// Converts back to JSON.
    ///
    /// A node keyed exactly `0..n` in order becomes an array, any other node
    /// an object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Leaf(leaf) => leaf.to_json(),
            Self::Node(children) => {
                let is_list = children
                    .keys()
                    .enumerate()
                    .all(|(position, key)| *key == TreeKey::Index(position));
                if is_list {
                    Value::Array(children.values().map(Self::to_json).collect())
                } else {
                    Value::Object(
                        children
                            .iter()
                            .map(|(key, child)| (key.to_string(), child.to_json()))
                            .collect::<Map<_, _>>(),
                    )
                }
            }
        }
    }
}

impl From<&Value> for ValueTree {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Self::Leaf(Leaf::Null),
            Value::Bool(b) => Self::Leaf(Leaf::Bool(*b)),
            Value::Number(n) => Self::Leaf(Leaf::Number(n.clone())),
            Value::String(s) => Self::Leaf(Leaf::String(s.clone())),
            Value::Array(items) => Self::Node(
                items.iter().enumerate().map(|(index, item)| (TreeKey::Index(index), item.into())).collect(),
            ),
            Value::Object(map) => Self::Node(
                map.iter().map(|(key, child)| (TreeKey::from_raw(key), child.into())).collect(),
            ),
        }
    }
}

impl From<Value> for ValueTree {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<&ValueTree> for Value {
    fn from(tree: &ValueTree) -> Self {
        tree.to_json()
    }
}

impl From<ValueTree> for Value {
    fn from(tree: ValueTree) -> Self {
        tree.to_json()
    }
}

impl Serialize for ValueTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ValueTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::zero("0", TreeKey::Index(0))]
    #[case::multi_digit("12", TreeKey::Index(12))]
    #[case::leading_zero("01", TreeKey::Name("01".to_string()))]
    #[case::negative("-1", TreeKey::Name("-1".to_string()))]
    #[case::name("title", TreeKey::Name("title".to_string()))]
    #[case::empty("", TreeKey::Name(String::new()))]
    fn tree_key_from_raw(#[case] raw: &str, #[case] expected: TreeKey) {
        assert_that!(TreeKey::from_raw(raw), eq(&expected));
    }

    #[rstest]
    #[case::null(Leaf::Null, true)]
    #[case::false_(Leaf::Bool(false), true)]
    #[case::empty_string(Leaf::String(String::new()), true)]
    #[case::true_(Leaf::Bool(true), false)]
    #[case::zero(Leaf::Number(0.into()), false)]
    #[case::float_zero(Leaf::Number(Number::from_f64(0.0).unwrap()), false)]
    #[case::string_zero(Leaf::String("0".to_string()), true)]
    #[case::text(Leaf::String("Bonjour".to_string()), false)]
    fn leaf_emptiness(#[case] leaf: Leaf, #[case] expected: bool) {
        assert_that!(leaf.is_empty(), eq(expected));
        assert_that!(ValueTree::Leaf(leaf).is_blank(), eq(expected));
    }

    #[rstest]
    #[case::null(Leaf::Null, "")]
    #[case::false_(Leaf::Bool(false), "")]
    #[case::true_(Leaf::Bool(true), "1")]
    #[case::zero(Leaf::Number(0.into()), "0")]
    #[case::text(Leaf::String("Bonjour".to_string()), "Bonjour")]
    fn leaf_display(#[case] leaf: Leaf, #[case] expected: &str) {
        assert_that!(leaf.to_string(), eq(expected));
    }

    #[googletest::test]
    fn array_and_numeric_object_align() {
        let from_array = ValueTree::from(json!([{"title": "a"}, {"title": "b"}]));
        let from_object = ValueTree::from(json!({"0": {"title": "a"}, "1": {"title": "b"}}));

        expect_that!(from_array, eq(&from_object));
        expect_that!(from_object.to_json(), eq(&json!([{"title": "a"}, {"title": "b"}])));
    }

    #[googletest::test]
    fn sparse_indices_serialize_as_object() {
        let tree = ValueTree::from(json!({"0": "a", "2": "c"}));

        expect_that!(tree.to_json(), eq(&json!({"0": "a", "2": "c"})));
    }

    #[googletest::test]
    fn reindexed_closes_gaps_in_order() {
        let tree = ValueTree::from(json!({"3": "c", "0": "a", "7": "z"}));

        let reindexed = tree.reindexed();

        expect_that!(reindexed.to_json(), eq(&json!(["c", "a", "z"])));
    }

    #[googletest::test]
    fn reindexed_leaves_named_nodes_alone() {
        let tree = ValueTree::from(json!({"title": "a", "0": "b"}));

        expect_that!(tree.clone().reindexed(), eq(&tree));
    }

    #[googletest::test]
    fn posted_lists_become_index_keyed_nodes() {
        let tree = ValueTree::from(json!([{"title": "Hello", "tags": ["x", "y"]}]));
        let children = tree.as_node().unwrap();

        expect_that!(children.len(), eq(1));
        expect_that!(
            children.get(&TreeKey::Index(0)).and_then(ValueTree::as_node).map(IndexMap::len),
            some(eq(2))
        );
    }

    #[googletest::test]
    fn serde_round_trip_keeps_order() {
        let text = r#"{"b":1,"a":[true,null,"x"]}"#;

        let tree: ValueTree = serde_json::from_str(text).unwrap();

        expect_that!(serde_json::to_string(&tree).unwrap(), eq(text));
    }

    #[googletest::test]
    fn blank_trees() {
        expect_that!(ValueTree::empty().is_blank(), eq(true));
        expect_that!(ValueTree::from(json!("")).is_blank(), eq(true));
        expect_that!(ValueTree::from(json!(0)).is_blank(), eq(false));
        expect_that!(ValueTree::from(json!({"title": ""})).is_blank(), eq(false));
    }
}
