//! Settings of the multi-locale nested form.
/// Settings file lookup
mod discovery;
/// Settings types and validation
mod types;

pub use discovery::SETTINGS_FILE_NAME;
pub use types::{
    ConfigError,
    FormSettings,
    ValidationError,
};
