//! Switching the locale a nested field is shown in.

use super::error::FormError;
use super::items::ItemCollection;
use super::repeater::Repeater;
use crate::locker::{
    Submission,
    locker_for,
    splice_live_tree,
};
use crate::transport::SwitchRequest;
use crate::tree::ValueTree;
use crate::types::LocaleCode;

/// Result of a locale switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    /// Item group markup in the target locale.
    pub rendered_markup: String,
    /// Values of the locale that was shown before the switch.
    pub cached_previous_value: ValueTree,
    /// Previous locale as named by the request.
    pub cached_previous_locale: Option<LocaleCode>,
    /// Locale the field is shown in now.
    pub active_locale: LocaleCode,
}

/// Rebuilds `repeater` in the request's target locale.
///
/// When the request names its previous locale, the repeater's live tree is
/// taken as that locale's values and spliced in before locking. Without one
/// the submission is locked as posted, so live values never stand in for a
/// locale nobody named. Either way the live tree is returned, re-indexed, for
/// the client to cache; then the items are replaced by the target locale's
/// locker entry. A locale with nothing stored yet yields no items.
///
/// # Errors
/// - [`FormError::Locker`] when the base locale's overrides are missing
pub fn switch_locale<R: Repeater + ?Sized>(
    repeater: &mut R,
    submission: &Submission,
    request: &SwitchRequest,
) -> Result<SwitchOutcome, FormError> {
    let live = repeater.current_tree();
    let mut locker = match &request.previous {
        Some(previous) => {
            tracing::debug!(from = %previous, to = %request.target, "Switching nested form locale");
            let marked = submission.clone().with_active_locale(Some(previous.clone()));
            let spliced = splice_live_tree(&marked, &live).unwrap_or(marked);
            locker_for(&spliced)?
        }
        None => {
            tracing::debug!(to = %request.target, "Switching nested form locale without a previous locale");
            locker_for(submission)?
        }
    };
    let cached_previous_value = live.reindexed();

    let target_tree = locker.take(&request.target).unwrap_or_else(|| {
        tracing::warn!(locale = %request.target, "No stored values for locale, starting empty");
        ValueTree::empty()
    });

    repeater.init_items_from(ItemCollection::from_tree(&target_tree));

    Ok(SwitchOutcome {
        rendered_markup: repeater.render(),
        cached_previous_value,
        cached_previous_locale: request.previous.clone(),
        active_locale: request.target.clone(),
    })
}
