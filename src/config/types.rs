use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::{
    LocaleCode,
    LocaleCodeError,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "locales[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings of the multi-locale nested form.
///
/// The reserved keys name where the transport puts locale data inside a
/// posted payload; they must match what the client side posts.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FormSettings {
    /// Locale that owns the structure of every nested field.
    pub base_locale: String,

    /// Locales an editor can switch between, base locale included.
    /// Translation is only offered with two or more.
    pub locales: Vec<String>,

    /// Top-level key of the per-locale override section.
    pub overrides_key: String,
    /// Segment between a locale and the field path inside the override section.
    pub overrides_segment: String,
    /// Top-level key of the active-locale markers.
    pub active_locale_key: String,

    /// Key naming the locale to switch to.
    pub switch_locale_key: String,
    /// Key naming the locale shown before the switch.
    pub previous_locale_key: String,

    /// Separator used in reported leaf paths.
    pub key_separator: String,
}

impl FormSettings {
    /// Whether switching locales makes sense at all.
    #[must_use]
    pub fn is_translatable(&self) -> bool {
        self.locales.len() > 1
    }

    /// The base locale as a [`LocaleCode`].
    pub fn base_locale_code(&self) -> Result<LocaleCode, LocaleCodeError> {
        LocaleCode::parse(&self.base_locale)
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid or duplicate locale code
    /// - Base locale not among the configured locales
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = LocaleCode::parse(&self.base_locale) {
            errors.push(ValidationError::new("baseLocale", e.to_string()));
        }

        if self.locales.is_empty() {
            errors.push(ValidationError::new(
                "locales",
                "At least one locale is required. Example: [\"en\", \"fr\"]",
            ));
        } else if !self.locales.contains(&self.base_locale) {
            errors.push(ValidationError::new(
                "locales",
                format!("The base locale '{}' must be listed in 'locales'", self.base_locale),
            ));
        }

        let mut seen = HashSet::new();
        for (index, locale) in self.locales.iter().enumerate() {
            if let Err(e) = LocaleCode::parse(locale) {
                errors.push(ValidationError::new(format!("locales[{index}]"), e.to_string()));
            } else if !seen.insert(locale.as_str()) {
                errors.push(ValidationError::new(
                    format!("locales[{index}]"),
                    format!("Duplicate locale '{locale}'"),
                ));
            }
        }

        let reserved_keys = [
            ("overridesKey", &self.overrides_key),
            ("overridesSegment", &self.overrides_segment),
            ("activeLocaleKey", &self.active_locale_key),
            ("switchLocaleKey", &self.switch_locale_key),
            ("previousLocaleKey", &self.previous_locale_key),
        ];
        for (field_path, value) in reserved_keys {
            if value.is_empty() {
                errors.push(ValidationError::new(field_path, "The key cannot be empty"));
            }
        }

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            base_locale: "en".to_string(),
            locales: vec!["en".to_string()],
            overrides_key: "RLTranslate".to_string(),
            overrides_segment: "mlnf".to_string(),
            active_locale_key: "RLTranslateNestedFormLocale".to_string(),
            switch_locale_key: "_nestedform_locale".to_string(),
            previous_locale_key: "_nestedform_previous_locale".to_string(),
            key_separator: ".".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = FormSettings::default();

        assert_that!(settings.validate(), ok(anything()));
        assert_that!(settings.is_translatable(), eq(false));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"locales": ["en", "fr"], "overridesKey": "Translate"}"#;

        let settings: FormSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.base_locale, eq("en"));
        assert_that!(settings.locales, elements_are![eq("en"), eq("fr")]);
        assert_that!(settings.overrides_key, eq("Translate"));
        assert_that!(settings.overrides_segment, eq("mlnf"));
        assert_that!(settings.is_translatable(), eq(true));
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: FormSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings, eq(&FormSettings::default()));
    }

    #[rstest]
    fn validate_invalid_base_locale() {
        let settings = FormSettings {
            base_locale: "e n".to_string(),
            locales: vec!["e n".to_string()],
            ..FormSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![
                all![
                    field!(ValidationError.field_path, eq("baseLocale")),
                    field!(ValidationError.message, contains_substring("Invalid locale code"))
                ],
                field!(ValidationError.field_path, eq("locales[0]"))
            ])
        );
    }

    #[rstest]
    fn validate_base_locale_not_listed() {
        let settings = FormSettings {
            locales: vec!["fr".to_string(), "de".to_string()],
            ..FormSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("locales")),
                field!(ValidationError.message, contains_substring("'en' must be listed"))
            ]])
        );
    }

    #[rstest]
    fn validate_empty_locales() {
        let settings = FormSettings { locales: vec![], ..FormSettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.message, contains_substring("At least one"))])
        );
    }

    #[rstest]
    fn validate_duplicate_locale() {
        let settings = FormSettings {
            locales: vec!["en".to_string(), "fr".to_string(), "en".to_string()],
            ..FormSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("locales[2]")),
                field!(ValidationError.message, contains_substring("Duplicate locale 'en'"))
            ]])
        );
    }

    #[rstest]
    #[case::overrides_key(FormSettings { overrides_key: String::new(), ..FormSettings::default() }, "overridesKey")]
    #[case::segment(FormSettings { overrides_segment: String::new(), ..FormSettings::default() }, "overridesSegment")]
    #[case::marker(FormSettings { active_locale_key: String::new(), ..FormSettings::default() }, "activeLocaleKey")]
    #[case::switch(FormSettings { switch_locale_key: String::new(), ..FormSettings::default() }, "switchLocaleKey")]
    #[case::previous(FormSettings { previous_locale_key: String::new(), ..FormSettings::default() }, "previousLocaleKey")]
    #[case::separator(FormSettings { key_separator: String::new(), ..FormSettings::default() }, "keySeparator")]
    fn validate_empty_keys(#[case] settings: FormSettings, #[case] field_path: &str) {
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq(field_path)),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = FormSettings {
            locales: vec![],
            key_separator: String::new(),
            ..FormSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. locales"));
        assert_that!(error_message, contains_substring("2. keySeparator"));
    }
}
