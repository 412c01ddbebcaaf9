//! Flattening of value trees into leaf paths.

use indexmap::IndexMap;

use super::value::{
    Leaf,
    TreeKey,
    ValueTree,
};

/// How child keys are appended to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle<'a> {
    /// `items[0].title`: names joined by the separator, indices in brackets.
    Dotted(&'a str),
    /// `items[0][title]`: every key in brackets, as in HTML field names.
    Bracketed,
}

/// Appends `key` to `prefix` using `style`.
#[must_use]
pub fn join_key(prefix: Option<&str>, key: &TreeKey, style: KeyStyle<'_>) -> String {
    match (prefix, key, style) {
        (None, TreeKey::Index(index), _) => format!("[{index}]"),
        (None, TreeKey::Name(name), _) => name.clone(),
        (Some(p), TreeKey::Index(index), _) => format!("{p}[{index}]"),
        (Some(p), TreeKey::Name(name), KeyStyle::Dotted(separator)) => {
            format!("{p}{separator}{name}")
        }
        (Some(p), TreeKey::Name(name), KeyStyle::Bracketed) => format!("{p}[{name}]"),
    }
}

/// Flattens a tree into `path -> leaf` pairs in tree order.
///
/// Empty nodes produce no entries. A bare leaf is only reported when a
/// prefix names it.
///
/// # Examples
/// ```
/// use ml_nested_form::tree::{KeyStyle, ValueTree, flatten_tree};
/// use serde_json::json;
///
/// let tree = ValueTree::from(json!([{"title": "Hello"}]));
///
/// let dotted = flatten_tree(&tree, KeyStyle::Dotted("."), Some("items"));
/// assert!(dotted.contains_key("items[0].title"));
///
/// let html = flatten_tree(&tree, KeyStyle::Bracketed, Some("Post[items]"));
/// assert!(html.contains_key("Post[items][0][title]"));
/// ```
#[must_use]
pub fn flatten_tree<'t>(
    tree: &'t ValueTree,
    style: KeyStyle<'_>,
    prefix: Option<&str>,
) -> IndexMap<String, &'t Leaf> {
    let mut result = IndexMap::new();
    flatten_into(tree, style, prefix, &mut result);
    result
}

/// Recursive worker for [`flatten_tree`].
fn flatten_into<'t>(
    tree: &'t ValueTree,
    style: KeyStyle<'_>,
    prefix: Option<&str>,
    result: &mut IndexMap<String, &'t Leaf>,
) {
    match tree {
        ValueTree::Node(children) => {
            for (key, child) in children {
                let full_key = join_key(prefix, key, style);
                flatten_into(child, style, Some(&full_key), result);
            }
        }
        ValueTree::Leaf(leaf) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), leaf);
            }
        }
    }
}
