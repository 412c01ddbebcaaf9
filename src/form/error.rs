use thiserror::Error;

use crate::locker::LockerError;
use crate::transport::TransportError;

/// Errors surfaced by the widget handlers
#[derive(Error, Debug)]
pub enum FormError {
    /// A locale switch was requested without naming the locale to switch to.
    #[error("Unable to find a nested form locale in '{key}'")]
    MissingTargetLocale { key: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Locker(#[from] LockerError),
}
