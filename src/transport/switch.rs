//! Locale switch request and response payloads.

use serde::ser::{
    Error as _,
    SerializeMap,
};
use serde::{
    Serialize,
    Serializer,
};
use serde_json::Value;

use super::error::TransportError;
use super::post::locale_at;
use crate::config::FormSettings;
use crate::form::FormError;
use crate::tree::ValueTree;
use crate::types::LocaleCode;

/// A client's request to show the field in another locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchRequest {
    /// Locale to switch to.
    pub target: LocaleCode,
    /// Locale the client was showing before the switch.
    pub previous: Option<LocaleCode>,
}

impl SwitchRequest {
    /// Reads the switch keys of `settings` from a raw post.
    ///
    /// # Errors
    /// - [`FormError::MissingTargetLocale`] when the target key is absent or blank
    /// - [`FormError::Transport`] when either locale is not a valid code
    pub fn from_post(post: &Value, settings: &FormSettings) -> Result<Self, FormError> {
        if !post.is_object() {
            return Err(TransportError::NotAnObject.into());
        }

        let target = locale_at(post, &[settings.switch_locale_key.as_str()])?.ok_or_else(|| {
            FormError::MissingTargetLocale { key: settings.switch_locale_key.clone() }
        })?;
        let previous = locale_at(post, &[settings.previous_locale_key.as_str()])?;

        Ok(Self { target, previous })
    }
}

/// Structural update sent back after a switch.
///
/// Serializes to `{"#<element id>": markup, "updateValue": "<json>", "updateLocale": ..}`
/// so the client can cache the previous locale's value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchResponse {
    /// Element id the markup replaces, without the leading `#`.
    pub element_id: String,
    pub markup: String,
    /// Canonical value of the locale that was active before the switch.
    pub update_value: ValueTree,
    pub update_locale: Option<LocaleCode>,
}

impl Serialize for SwitchResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let update_value = serde_json::to_string(&self.update_value).map_err(S::Error::custom)?;

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(&format!("#{}", self.element_id), &self.markup)?;
        map.serialize_entry("updateValue", &update_value)?;
        map.serialize_entry("updateLocale", &self.update_locale)?;
        map.end()
    }
}
