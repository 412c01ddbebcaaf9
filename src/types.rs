//! Core types used throughout the project.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Error returned when a string is not a usable locale code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid locale code '{value}': {reason}")]
pub struct LocaleCodeError {
    pub value: String,
    pub reason: &'static str,
}

/// Opaque locale identifier such as `en`, `fr` or `pt-BR`.
///
/// Codes are compared verbatim; `en-US` and `en_us` are different locales.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Parses a locale code.
    ///
    /// Accepts ASCII letters and digits in segments separated by `-` or `_`,
    /// starting with a letter (e.g. `en`, `zh-Hant-TW`, `en_us`).
    pub fn parse(value: &str) -> Result<Self, LocaleCodeError> {
        let invalid = |reason| LocaleCodeError { value: value.to_string(), reason };

        if value.is_empty() {
            return Err(invalid("locale code cannot be empty"));
        }
        if !value.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(invalid("locale code must start with a letter"));
        }
        if value.split(['-', '_']).any(str::is_empty) {
            return Err(invalid("locale code contains an empty segment"));
        }
        if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(invalid("only ASCII letters, digits, '-' and '_' are allowed"));
        }

        Ok(Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LocaleCode {
    type Error = LocaleCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.0
    }
}

impl PartialEq<str> for LocaleCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Path of a form field inside the posted payload.
///
/// Built from an HTML field name (`content[items][0]`) or a dot path
/// (`content.items.0`); both produce the same segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    /// Non-empty segments, outermost first.
    segments: Vec<String>,
}

impl FieldPath {
    /// Splits a field name into its segments.
    ///
    /// Empty segments (`items[]`) are dropped.
    ///
    /// # Examples
    /// ```
    /// use ml_nested_form::types::FieldPath;
    ///
    /// let path = FieldPath::parse("content[items]");
    /// assert_eq!(path.segments(), ["content", "items"]);
    /// assert_eq!(path, FieldPath::parse("content.items"));
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let segments = name
            .split(['[', ']', '.'])
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(ToString::to_string)
            .collect();
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Dot-joined form, as used in log output.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}
