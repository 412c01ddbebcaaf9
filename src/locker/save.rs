//! Extraction of the value persisted for a nested field.

use super::error::LockerError;
use super::locale_locker::{
    Locker,
    locker_for,
};
use super::submission::Submission;
use crate::tree::ValueTree;

/// Treats `live` as the active locale's authoritative overrides.
///
/// The widget only ever posts the values of the locale it is showing, so
/// before locking those values are moved under that locale's override key.
/// The live tree also becomes the candidate. Returns `None` when the
/// submission does not say which locale was active.
#[must_use]
pub fn splice_live_tree(submission: &Submission, live: &ValueTree) -> Option<Submission> {
    let active = submission.active_locale()?.clone();

    Some(
        submission
            .clone()
            .with_candidate(live.clone())
            .with_locale_overrides(active, live.clone()),
    )
}

/// Canonical (base locale) value for a live tree.
///
/// Without an active-locale marker nothing is reconciled: the posted base
/// overrides are returned as they are, or `live` itself when there are none.
/// A list of items is re-indexed from zero.
///
/// # Errors
/// - [`LockerError::MissingBaseOverrides`] from [`locker_for`].
pub fn primary_value(submission: &Submission, live: &ValueTree) -> Result<ValueTree, LockerError> {
    let Some(spliced) = splice_live_tree(submission, live) else {
        tracing::debug!("No active locale marker, keeping posted value");
        let raw = submission.base_overrides().unwrap_or(live);
        return Ok(raw.clone().reindexed());
    };

    let mut locker = locker_for(&spliced)?;
    let base = spliced.base_locale();
    locker
        .take(base)
        .map(ValueTree::reindexed)
        .ok_or_else(|| LockerError::MissingBaseOverrides { base: base.clone() })
}

/// Value to persist for the field: the reconciled base-locale tree.
///
/// # Errors
/// - [`LockerError::MissingBaseOverrides`] from [`locker_for`].
pub fn extract_save_value(submission: &Submission) -> Result<ValueTree, LockerError> {
    primary_value(submission, submission.candidate())
}

/// Secondary translations to store next to the persisted value.
///
/// The locker of the spliced submission without the base locale's entry.
/// Empty when there is no active-locale marker.
///
/// # Errors
/// - [`LockerError::MissingBaseOverrides`] from [`locker_for`].
pub fn extract_translations(submission: &Submission) -> Result<Locker, LockerError> {
    let Some(spliced) = splice_live_tree(submission, submission.candidate()) else {
        return Ok(Locker::default());
    };

    let mut locker = locker_for(&spliced)?;
    locker.take(spliced.base_locale());
    Ok(locker)
}
