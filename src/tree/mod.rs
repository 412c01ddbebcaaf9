//! Nested value trees and helpers over them.

/// Leaf path flattening
mod flatten;
/// Tree, key and leaf types
mod value;

pub use flatten::{
    KeyStyle,
    flatten_tree,
    join_key,
};
pub use value::{
    Leaf,
    TreeKey,
    TreeMap,
    ValueTree,
};
