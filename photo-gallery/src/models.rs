use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Metadata of one stored photo
///
/// Serialized as `{"filepath": ..., "webviewPath": ...}` so lists written by
/// earlier app versions stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhotoRecord {
    /// File name in the app data directory, unique per record
    pub filepath: String,
    /// Locator the UI can render right away (data URI or native locator)
    #[serde(
        rename = "webviewPath",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub display_path: Option<String>,
}

impl PhotoRecord {
    pub fn new(filepath: impl Into<String>, display_path: Option<String>) -> Self {
        Self {
            filepath: filepath.into(),
            display_path,
        }
    }

    /// Parse a persisted photo list. A missing or blank value is an empty list.
    pub fn list_from_json(value: Option<&str>) -> Result<Vec<PhotoRecord>, serde_json::Error> {
        match value {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(json),
            _ => Ok(Vec::new()),
        }
    }

    pub fn list_to_json(photos: &[PhotoRecord]) -> Result<String, serde_json::Error> {
        serde_json::to_string(photos)
    }
}

/// Execution mode of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Native camera and filesystem access (Android, iOS)
    Hybrid,
    /// Browser-like mode, stored files are rendered through data URIs
    Web,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            Platform::Hybrid
        } else {
            Platform::Web
        }
    }

    pub fn is_hybrid(self) -> bool {
        self == Platform::Hybrid
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::current()
    }
}

/// Storage scope for content files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Directory {
    /// Application-private, persistent
    Data,
}

/// Shape of the capture result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraResultType {
    Uri,
    Base64,
    DataUrl,
}

/// Where the photo comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraSource {
    Prompt,
    Camera,
    Photos,
}

/// Options passed to the capture service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOptions {
    pub result_type: CameraResultType,
    pub source: CameraSource,
    /// JPEG quality, 0-100
    pub quality: u8,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            result_type: CameraResultType::Uri,
            source: CameraSource::Camera,
            quality: 100,
        }
    }
}

/// Transient photo produced by the capture service
///
/// Native platforms fill `path`, web fills `web_path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedPhoto {
    /// Absolute filesystem path of the captured image
    pub path: Option<String>,
    /// Locator loadable by a web view (blob, http, data or file URL)
    pub web_path: Option<String>,
}

impl CapturedPhoto {
    pub fn native(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            web_path: None,
        }
    }

    pub fn web(web_path: impl Into<String>) -> Self {
        Self {
            path: None,
            web_path: Some(web_path.into()),
        }
    }

    /// Locator stored as the display path of a freshly saved record
    pub fn display_locator(&self) -> Option<String> {
        self.web_path.clone().or_else(|| self.path.clone())
    }
}

/// Configuration for photo gallery initialization
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoGalleryConfig {
    /// Base directory for photo content ([`Directory::Data`])
    pub data_dir: PathBuf,
    /// Preference key holding the serialized photo list
    pub preferences_key: String,
    pub platform: Platform,
}

impl Default for PhotoGalleryConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            preferences_key: "photos".to_string(),
            platform: Platform::current(),
        }
    }
}

impl PhotoGalleryConfig {
    /// Config for the given data directory, everything else default
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Apply the settings present in a TOML document, keep the rest
    pub fn apply_toml(mut self, s: &str) -> Result<Self, toml::de::Error> {
        let overrides: ConfigOverrides = toml::from_str(s)?;
        if let Some(data_dir) = overrides.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(key) = overrides.preferences_key {
            self.preferences_key = key;
        }
        if let Some(platform) = overrides.platform {
            self.platform = platform;
        }
        Ok(self)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigOverrides {
    data_dir: Option<PathBuf>,
    preferences_key: Option<String>,
    platform: Option<Platform>,
}
