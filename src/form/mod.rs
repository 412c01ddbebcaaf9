//! The nested form widget and its repeater collaborator.

/// Widget errors
mod error;
/// Hidden input repeater
mod hidden;
/// Live item collection
mod items;
/// Repeater trait
mod repeater;
/// Locale switching
mod switch;
/// The widget
mod widget;

pub use error::FormError;
pub use hidden::HiddenInputRepeater;
pub use items::{
    Item,
    ItemCollection,
};
pub use repeater::Repeater;
pub use switch::{
    SwitchOutcome,
    switch_locale,
};
pub use widget::{
    MlNestedForm,
    SaveOutcome,
};
