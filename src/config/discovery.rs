//! Finding and reading the settings file.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    FormSettings,
};

/// Settings file name, looked up from the working directory upwards.
pub const SETTINGS_FILE_NAME: &str = ".ml-nested-form.json";

impl FormSettings {
    /// Reads and validates one settings file.
    ///
    /// # Errors
    /// - [`ConfigError::IoError`] when the file cannot be read
    /// - [`ConfigError::ParseError`] when it is not valid settings JSON
    /// - [`ConfigError::ValidationErrors`] when the values are inconsistent
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&content)?;
        settings.validate().map_err(ConfigError::ValidationErrors)?;
        tracing::debug!(path = %path.display(), locales = settings.locales.len(), "Loaded form settings");
        Ok(settings)
    }

    /// Settings for a working directory.
    ///
    /// Uses the nearest settings file in `start` or one of its ancestors.
    /// Without a directory, or when no ancestor has one, the defaults apply.
    ///
    /// # Errors
    /// Whatever [`FormSettings::from_file`] reports for the file found.
    pub fn discover(start: Option<&Path>) -> Result<Self, ConfigError> {
        match start.and_then(find_settings_file) {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!(?start, "No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Nearest settings file at or above `start`.
fn find_settings_file(start: &Path) -> Option<PathBuf> {
    start.ancestors().map(|dir| dir.join(SETTINGS_FILE_NAME)).find(|path| path.is_file())
}
