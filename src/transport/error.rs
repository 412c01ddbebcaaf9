use thiserror::Error;

use crate::types::{
    LocaleCode,
    LocaleCodeError,
};

/// Errors raised while reading a posted payload
#[derive(Error, Debug)]
pub enum TransportError {
    /// The payload is not a JSON object.
    #[error("Posted payload must be a JSON object")]
    NotAnObject,

    /// A locale named by the payload (or the settings) is not a valid code.
    #[error("Invalid locale in '{key}': {source}")]
    InvalidLocale {
        key: String,
        #[source]
        source: LocaleCodeError,
    },

    /// A locale's overrides were posted as a string that is not JSON.
    #[error("Overrides for locale '{locale}' are not valid JSON: {source}")]
    MalformedOverride {
        locale: LocaleCode,
        #[source]
        source: serde_json::Error,
    },
}
