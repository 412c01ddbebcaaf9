use thiserror::Error;

use crate::types::LocaleCode;

/// Errors raised while reconciling locale data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LockerError {
    /// The submission carries locale overrides but none for the base locale,
    /// so there is no reference to fall back to.
    #[error("Locale overrides are missing the base locale '{base}'")]
    MissingBaseOverrides { base: LocaleCode },
}
