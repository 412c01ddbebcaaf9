//! A repeater that renders its items as hidden inputs.

use super::items::ItemCollection;
use super::repeater::Repeater;
use crate::tree::{
    KeyStyle,
    flatten_tree,
};

/// Renders one `<input type="hidden">` per leaf, named after the field.
///
/// Enough for a client that keeps its own editing UI and only needs the
/// values round-tripped through the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenInputRepeater {
    /// HTML name of the field (`Post[items]`).
    input_name: String,
    /// Live items.
    items: ItemCollection,
}

impl HiddenInputRepeater {
    #[must_use]
    pub fn new(input_name: impl Into<String>) -> Self {
        Self { input_name: input_name.into(), items: ItemCollection::default() }
    }
}

impl Repeater for HiddenInputRepeater {
    fn init_items_from(&mut self, items: ItemCollection) {
        tracing::trace!(name = %self.input_name, count = items.len(), "Replacing repeater items");
        self.items = items;
    }

    fn items(&self) -> &ItemCollection {
        &self.items
    }

    fn render(&self) -> String {
        let tree = self.current_tree();
        flatten_tree(&tree, KeyStyle::Bracketed, Some(&self.input_name))
            .into_iter()
            .map(|(name, leaf)| {
                format!(
                    r#"<input type="hidden" name="{}" value="{}">"#,
                    v_htmlescape::escape(&name),
                    v_htmlescape::escape(&leaf.to_string())
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
