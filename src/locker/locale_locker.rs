//! Per-request locale locker.

use indexmap::IndexMap;

use super::error::LockerError;
use super::merge::merge_leaves;
use super::submission::Submission;
use crate::tree::ValueTree;
use crate::types::LocaleCode;

/// Reconciled tree for every locale of one submission.
///
/// A derived view: recomputed from the submission on every request and
/// never persisted on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locker {
    /// Reconciled tree per locale, in submission order.
    entries: IndexMap<LocaleCode, ValueTree>,
}

impl Locker {
    #[must_use]
    pub fn get(&self, locale: &LocaleCode) -> Option<&ValueTree> {
        self.entries.get(locale)
    }

    /// Removes and returns one locale's tree.
    pub fn take(&mut self, locale: &LocaleCode) -> Option<ValueTree> {
        self.entries.shift_remove(locale)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Reconciled trees in submission order.
    #[must_use]
    pub fn into_entries(self) -> IndexMap<LocaleCode, ValueTree> {
        self.entries
    }
}

/// Builds the locker for a submission.
///
/// Every posted locale gets `merge_leaves(candidate, base, overrides[locale])`,
/// the base locale included. A submission without an override section
/// yields an empty locker.
///
/// # Errors
/// - [`LockerError::MissingBaseOverrides`] when overrides were posted but not
///   for the base locale.
pub fn locker_for(submission: &Submission) -> Result<Locker, LockerError> {
    let Some(overrides) = submission.overrides() else {
        tracing::debug!("No locale overrides posted, locker is empty");
        return Ok(Locker::default());
    };

    let base_locale = submission.base_locale();
    let base = submission
        .base_overrides()
        .ok_or_else(|| LockerError::MissingBaseOverrides { base: base_locale.clone() })?;
    let candidate = submission.candidate();

    let entries = overrides
        .iter()
        .map(|(locale, target)| {
            tracing::trace!(locale = %locale, "Merging locale leaves");
            (locale.clone(), merge_leaves(candidate, base, target))
        })
        .collect::<IndexMap<_, _>>();

    tracing::debug!(
        base = %base_locale,
        locales = entries.len(),
        "Built locale locker"
    );

    Ok(Locker { entries })
}
