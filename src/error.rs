use std::fmt;

/// Central error types for the photo album app
#[derive(Debug)]
pub enum AppError {
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Invalid `gallery.toml`
    Config(toml::de::Error),
    /// Preference database could not be opened
    Preferences(photo_gallery::PreferencesError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(e) => write!(f, "Configuration error: {}", e),
            AppError::Preferences(e) => write!(f, "Preferences error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e)
    }
}

impl From<photo_gallery::PreferencesError> for AppError {
    fn from(e: photo_gallery::PreferencesError) -> Self {
        AppError::Preferences(e)
    }
}
