//! Typed view of one form submission for a single nested field.

use indexmap::IndexMap;

use crate::tree::ValueTree;
use crate::types::LocaleCode;

/// Leaf overrides per locale, in submission order.
pub type LocaleOverrides = IndexMap<LocaleCode, ValueTree>;

/// Everything the reconciliation needs from one request.
///
/// Built fresh for every request and never shared between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Locale whose structure is authoritative.
    base_locale: LocaleCode,
    /// The live, currently rendered tree of the field.
    candidate: ValueTree,
    /// `None` when the field was never handled by the multi-locale layer.
    overrides: Option<LocaleOverrides>,
    /// Locale that was active in the client when the form was posted.
    active_locale: Option<LocaleCode>,
}

impl Submission {
    #[must_use]
    pub const fn new(base_locale: LocaleCode, candidate: ValueTree) -> Self {
        Self { base_locale, candidate, overrides: None, active_locale: None }
    }

    /// Replaces the whole override section.
    #[must_use]
    pub fn with_overrides(mut self, overrides: LocaleOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Sets one locale's overrides, creating the section when missing.
    #[must_use]
    pub fn with_locale_overrides(mut self, locale: LocaleCode, tree: ValueTree) -> Self {
        self.overrides.get_or_insert_with(LocaleOverrides::new).insert(locale, tree);
        self
    }

    #[must_use]
    pub fn with_active_locale(mut self, locale: Option<LocaleCode>) -> Self {
        self.active_locale = locale;
        self
    }

    #[must_use]
    pub fn with_candidate(mut self, candidate: ValueTree) -> Self {
        self.candidate = candidate;
        self
    }

    #[must_use]
    pub const fn base_locale(&self) -> &LocaleCode {
        &self.base_locale
    }

    #[must_use]
    pub const fn candidate(&self) -> &ValueTree {
        &self.candidate
    }

    #[must_use]
    pub const fn overrides(&self) -> Option<&LocaleOverrides> {
        self.overrides.as_ref()
    }

    /// The base locale's own override tree, if posted.
    #[must_use]
    pub fn base_overrides(&self) -> Option<&ValueTree> {
        self.overrides.as_ref().and_then(|overrides| overrides.get(&self.base_locale))
    }

    #[must_use]
    pub const fn active_locale(&self) -> Option<&LocaleCode> {
        self.active_locale.as_ref()
    }
}
