//! Locale data reconciliation.
//!
//! One locale (the base locale) owns the structure of a nested field; every
//! other locale only supplies leaf values aligned with that structure. This
//! module merges those leaves ([`merge_leaves`]), derives the per-locale
//! [`Locker`] of a submission ([`locker_for`]) and extracts the value that is
//! finally persisted ([`extract_save_value`]).

/// Translation coverage report
mod coverage;
/// Locker errors
mod error;
/// Per-request locale locker
mod locale_locker;
/// Leaf merge
mod merge;
/// Save value extraction
mod save;
/// Typed submission
mod submission;

pub use coverage::{
    Coverage,
    translation_coverage,
};
pub use error::LockerError;
pub use locale_locker::{
    Locker,
    locker_for,
};
pub use merge::merge_leaves;
pub use save::{
    extract_save_value,
    extract_translations,
    primary_value,
    splice_live_tree,
};
pub use submission::{
    LocaleOverrides,
    Submission,
};
