//! The multi-locale nested form widget.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::error::FormError;
use super::items::ItemCollection;
use super::repeater::Repeater;
use super::switch::switch_locale;
use crate::config::FormSettings;
use crate::locker::{
    Coverage,
    Submission,
    extract_save_value,
    extract_translations,
    locker_for,
    translation_coverage,
};
use crate::transport::{
    FieldBinding,
    SwitchRequest,
    SwitchResponse,
    TransportError,
    read_submission,
};
use crate::tree::ValueTree;
use crate::types::LocaleCode;

/// Suffix of the wrapper element's id.
const CONTAINER_SUFFIX: &str = "mlNestedForm";

/// What a form submission stores for the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaveOutcome {
    /// Base-locale value written to the field itself.
    pub value: ValueTree,
    /// Reconciled trees of the other locales.
    pub translations: IndexMap<LocaleCode, ValueTree>,
}

/// A nested repeater field editable in several locales.
///
/// Only ever shows one locale at a time; switching replaces the repeater's
/// items with the target locale's tree.
#[derive(Debug)]
pub struct MlNestedForm<R> {
    /// Field the widget edits.
    binding: FieldBinding,
    /// Locales and reserved keys.
    settings: FormSettings,
    /// Renders the items of the shown locale.
    repeater: R,
    /// Locale currently shown.
    active_locale: LocaleCode,
}

impl<R: Repeater> MlNestedForm<R> {
    /// Creates the widget showing the base locale.
    ///
    /// # Errors
    /// - [`FormError::Transport`] when the configured base locale is invalid
    pub fn new(binding: FieldBinding, settings: FormSettings, repeater: R) -> Result<Self, FormError> {
        let active_locale = settings.base_locale_code().map_err(|source| {
            TransportError::InvalidLocale { key: "baseLocale".to_string(), source }
        })?;

        Ok(Self { binding, settings, repeater, active_locale })
    }

    #[must_use]
    pub const fn binding(&self) -> &FieldBinding {
        &self.binding
    }

    #[must_use]
    pub const fn settings(&self) -> &FormSettings {
        &self.settings
    }

    #[must_use]
    pub const fn repeater(&self) -> &R {
        &self.repeater
    }

    #[must_use]
    pub const fn active_locale(&self) -> &LocaleCode {
        &self.active_locale
    }

    /// Loads the base locale's values into the repeater.
    ///
    /// Uses the base locale's locker entry, or the candidate when the field
    /// has no override section yet.
    ///
    /// # Errors
    /// - [`FormError::Locker`] when overrides were posted without the base locale
    pub fn init(&mut self, submission: &Submission) -> Result<(), FormError> {
        let base = submission.base_locale();
        let tree = locker_for(submission)?
            .take(base)
            .unwrap_or_else(|| submission.candidate().clone());

        self.repeater.init_items_from(ItemCollection::from_tree(&tree));
        self.active_locale = base.clone();
        Ok(())
    }

    /// Markup of the field.
    ///
    /// With a single configured locale this is just the repeater's markup.
    #[must_use]
    pub fn render(&self) -> String {
        let markup = self.repeater.render();
        if !self.settings.is_translatable() {
            return markup;
        }

        format!(
            "<div id=\"{}\" data-control=\"mlnestedform\" data-default-locale=\"{}\" data-active-locale=\"{}\">\n{markup}\n</div>",
            v_htmlescape::escape(&self.binding.element_id(CONTAINER_SUFFIX)),
            self.settings.base_locale,
            self.active_locale,
        )
    }

    /// Reads a posted payload into this field's submission.
    ///
    /// # Errors
    /// - [`FormError::Transport`] for an unreadable payload
    pub fn read(&self, post: &Value) -> Result<Submission, FormError> {
        Ok(read_submission(post, &self.binding, &self.settings)?)
    }

    /// Values to store for a submitted form.
    ///
    /// # Errors
    /// - [`FormError::Transport`] for an unreadable payload
    /// - [`FormError::Locker`] when overrides were posted without the base locale
    pub fn save(&self, post: &Value) -> Result<SaveOutcome, FormError> {
        let submission = self.read(post)?;
        let value = extract_save_value(&submission)?;
        let translations = extract_translations(&submission)?.into_entries();

        tracing::debug!(
            field = %self.binding.field(),
            translations = translations.len(),
            "Extracted save value"
        );
        Ok(SaveOutcome { value, translations })
    }

    /// Handles a locale switch request.
    ///
    /// The posted field values are loaded as the live items, then the
    /// repeater is rebuilt in the target locale.
    ///
    /// # Errors
    /// - [`FormError::MissingTargetLocale`] when no target locale was posted
    /// - [`FormError::Transport`] for an unreadable payload
    /// - [`FormError::Locker`] when overrides were posted without the base locale
    pub fn on_switch_item_locale(&mut self, post: &Value) -> Result<SwitchResponse, FormError> {
        let request = SwitchRequest::from_post(post, &self.settings)?;
        let submission = self.read(post)?;

        self.repeater.init_items_from(ItemCollection::from_tree(submission.candidate()));
        let outcome = switch_locale(&mut self.repeater, &submission, &request)?;
        self.active_locale = outcome.active_locale;

        Ok(SwitchResponse {
            element_id: self.binding.element_id(CONTAINER_SUFFIX),
            markup: outcome.rendered_markup,
            update_value: outcome.cached_previous_value,
            update_locale: outcome.cached_previous_locale,
        })
    }

    /// Translation coverage of a posted payload, per locale.
    ///
    /// # Errors
    /// - [`FormError::Transport`] for an unreadable payload
    /// - [`FormError::Locker`] when overrides were posted without the base locale
    pub fn coverage(&self, post: &Value) -> Result<IndexMap<LocaleCode, Coverage>, FormError> {
        let submission = self.read(post)?;
        Ok(translation_coverage(&submission, &self.settings.key_separator)?)
    }
}
