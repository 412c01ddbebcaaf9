//! Live item collection of a nested field.

use crate::tree::{
    TreeKey,
    TreeMap,
    ValueTree,
};

/// One editable item: its key in the posted list and its sub-tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Identity of the item within the list.
    key: TreeKey,
    /// Values of the item's fields.
    value: ValueTree,
}

impl Item {
    #[must_use]
    pub const fn new(key: TreeKey, value: ValueTree) -> Self {
        Self { key, value }
    }

    #[must_use]
    pub const fn key(&self) -> &TreeKey {
        &self.key
    }

    #[must_use]
    pub const fn value(&self) -> &ValueTree {
        &self.value
    }
}

/// Ordered items of a repeater.
///
/// Always built whole from a tree; a locale switch replaces the collection
/// rather than patching it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCollection {
    /// Items in display order.
    items: Vec<Item>,
}

impl ItemCollection {
    /// One item per non-blank child of `tree`, in order.
    ///
    /// A leaf (or blank) tree yields no items.
    #[must_use]
    pub fn from_tree(tree: &ValueTree) -> Self {
        let items = tree
            .as_node()
            .into_iter()
            .flatten()
            .filter(|(_, child)| !child.is_blank())
            .map(|(key, child)| Item::new(key.clone(), child.clone()))
            .collect();
        Self { items }
    }

    /// The items as a node keyed by their identities.
    #[must_use]
    pub fn to_tree(&self) -> ValueTree {
        ValueTree::Node(
            self.items
                .iter()
                .map(|item| (item.key.clone(), item.value.clone()))
                .collect::<TreeMap>(),
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }
}
