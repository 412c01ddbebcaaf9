//! ml-nested-form
//!
//! Multi-locale editing of repeatable nested form fields. One base locale
//! owns the structure of the field; other locales only override its leaves.

pub mod config;
pub mod form;
pub mod locker;
pub mod transport;
pub mod tree;
pub mod types;

mod test_utils;

pub use form::{
    HiddenInputRepeater,
    MlNestedForm,
};
