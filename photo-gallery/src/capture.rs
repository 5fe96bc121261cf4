use crate::models::{CameraResultType, CameraSource, CaptureOptions, CapturedPhoto};
use crate::picker::{self, AndroidPickerConfig};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub enum CaptureError {
    PermissionDenied(String),
    Timeout(String),
    Cancelled(String),
    PlatformNotSupported(String),
    Other(String),
}

impl std::fmt::Display for CaptureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            CaptureError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            CaptureError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            CaptureError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            CaptureError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Source of freshly captured photos
#[async_trait]
pub trait CaptureService: Send + Sync {
    async fn get_photo(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError>;
}

/// Device camera
///
/// Uses the Android camera bridge; other platforms report
/// [`CaptureError::PlatformNotSupported`]. The bridge always shoots a new
/// photo and hands back a file path, so only [`CameraSource::Camera`] with
/// [`CameraResultType::Uri`] is accepted.
#[derive(Debug, Clone, Default)]
pub struct CameraCapture {
    config: AndroidPickerConfig,
}

impl CameraCapture {
    pub fn new(config: AndroidPickerConfig) -> Self {
        Self { config }
    }

}

fn check_supported(options: &CaptureOptions) -> Result<(), CaptureError> {
    match options.source {
        CameraSource::Camera => {}
        CameraSource::Prompt | CameraSource::Photos => {
            return Err(CaptureError::PlatformNotSupported(format!(
                "photo source {:?}",
                options.source
            )))
        }
    }
    match options.result_type {
        CameraResultType::Uri => Ok(()),
        CameraResultType::Base64 | CameraResultType::DataUrl => Err(
            CaptureError::PlatformNotSupported(format!("result type {:?}", options.result_type)),
        ),
    }
}

#[async_trait]
impl CaptureService for CameraCapture {
    async fn get_photo(&self, options: &CaptureOptions) -> Result<CapturedPhoto, CaptureError> {
        log::debug!(
            "Launching camera: source={:?}, result={:?}, quality={}",
            options.source,
            options.result_type,
            options.quality
        );
        check_supported(options)?;

        // The bridge polls the activity, keep it off the async runtime
        let config = self.config.clone();
        let path = tokio::task::spawn_blocking(move || picker::capture_photo_with_config(&config))
            .await
            .map_err(|e| CaptureError::Other(format!("Task join error: {}", e)))??;

        log::debug!("Camera returned {:?}", path);
        Ok(CapturedPhoto::native(path.to_string_lossy().to_string()))
    }
}
