//! The repeater seam: whatever renders and tracks the live items.

use super::items::ItemCollection;
use crate::tree::ValueTree;

/// Nested item widget driven by the multi-locale layer.
///
/// The layer decides when items are (re)initialized; the repeater owns
/// rendering and per-item state.
pub trait Repeater {
    /// Replaces every live item with `items`.
    fn init_items_from(&mut self, items: ItemCollection);

    /// The live items.
    fn items(&self) -> &ItemCollection;

    /// Live state as a tree.
    fn current_tree(&self) -> ValueTree {
        self.items().to_tree()
    }

    /// Markup of the item group.
    fn render(&self) -> String;
}
