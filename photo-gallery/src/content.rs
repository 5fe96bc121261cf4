use crate::encoding::{decode_base64, encode_base64};
use crate::models::{Directory, PhotoGalleryConfig};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::Mutex;

/// Error type for content store operations
#[derive(Debug)]
pub enum ContentError {
    Io(std::io::Error),
    NotFound(String),
    InvalidPath(String),
    Encoding(base64::DecodeError),
    Other(String),
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentError::Io(e) => write!(f, "IO error: {}", e),
            ContentError::NotFound(path) => write!(f, "File not found: {}", path),
            ContentError::InvalidPath(msg) => write!(f, "Invalid path: {}", msg),
            ContentError::Encoding(e) => write!(f, "Invalid base64 data: {}", e),
            ContentError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ContentError {}

impl From<std::io::Error> for ContentError {
    fn from(err: std::io::Error) -> Self {
        ContentError::Io(err)
    }
}

impl From<base64::DecodeError> for ContentError {
    fn from(err: base64::DecodeError) -> Self {
        ContentError::Encoding(err)
    }
}

/// Durable file storage exchanging content as base64 strings
///
/// A `None` directory on read means `path` is absolute (e.g. a file the
/// camera just wrote). Writes accept plain base64 or a base64 data URI.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn read_file(&self, path: &str, directory: Option<Directory>)
        -> Result<String, ContentError>;

    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<(), ContentError>;

    async fn delete_file(&self, path: &str, directory: Directory) -> Result<(), ContentError>;
}

/// Rejects paths that would escape the directory they are scoped to
fn validate_relative_path(path: &str) -> Result<(), ContentError> {
    if path.trim().is_empty() {
        return Err(ContentError::InvalidPath("empty path".to_string()));
    }
    let escapes = Path::new(path)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ContentError::InvalidPath(format!(
            "{} is not a plain relative path",
            path
        )));
    }
    Ok(())
}

fn not_found_or_io(err: std::io::Error, path: &Path) -> ContentError {
    if err.kind() == std::io::ErrorKind::NotFound {
        ContentError::NotFound(path.display().to_string())
    } else {
        ContentError::Io(err)
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ContentError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ContentError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ContentError::Other(format!("Task join error: {}", e)))?
}

/// Content store on the local filesystem
#[derive(Debug, Clone)]
pub struct FsContentStore {
    data_dir: PathBuf,
}

impl FsContentStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn from_config(config: &PhotoGalleryConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    pub fn root(&self, directory: Directory) -> &Path {
        match directory {
            Directory::Data => &self.data_dir,
        }
    }

    /// Absolute location of `path` in `directory`
    pub fn resolve(&self, path: &str, directory: Option<Directory>) -> Result<PathBuf, ContentError> {
        match directory {
            Some(directory) => {
                validate_relative_path(path)?;
                Ok(self.root(directory).join(path))
            }
            None => {
                let path = path.strip_prefix("file://").unwrap_or(path);
                let absolute = PathBuf::from(path);
                if !absolute.is_absolute() {
                    return Err(ContentError::InvalidPath(format!(
                        "{} is not absolute",
                        path
                    )));
                }
                Ok(absolute)
            }
        }
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, ContentError> {
        let file_path = self.resolve(path, directory)?;
        run_blocking(move || {
            let bytes = std::fs::read(&file_path).map_err(|e| not_found_or_io(e, &file_path))?;
            Ok(encode_base64(&bytes))
        })
        .await
    }

    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<(), ContentError> {
        let file_path = self.resolve(path, Some(directory))?;
        let bytes = decode_base64(data)?;

        run_blocking(move || {
            let parent = file_path
                .parent()
                .ok_or_else(|| ContentError::InvalidPath("No parent directory found".to_string()))?;
            std::fs::create_dir_all(parent)?;

            // Write next to the target, then rename over it
            let tmp_path = parent.join(format!(".{}.tmp", uuid::Uuid::new_v4()));
            if let Err(e) = std::fs::write(&tmp_path, &bytes) {
                let _ = std::fs::remove_file(&tmp_path);
                return Err(e.into());
            }
            if let Err(e) = std::fs::rename(&tmp_path, &file_path) {
                let _ = std::fs::remove_file(&tmp_path);
                return Err(e.into());
            }

            log::debug!("Wrote {} bytes to {:?}", bytes.len(), file_path);
            Ok(())
        })
        .await
    }

    async fn delete_file(&self, path: &str, directory: Directory) -> Result<(), ContentError> {
        let file_path = self.resolve(path, Some(directory))?;
        run_blocking(move || {
            std::fs::remove_file(&file_path).map_err(|e| not_found_or_io(e, &file_path))?;
            log::debug!("Deleted {:?}", file_path);
            Ok(())
        })
        .await
    }
}

/// In-process content store
///
/// Nothing survives the process; used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    files: Mutex<HashMap<(Option<Directory>, String), Vec<u8>>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes, e.g. to stand in for a file the camera wrote
    pub fn insert_file(&self, path: &str, directory: Option<Directory>, bytes: Vec<u8>) {
        if let Ok(mut files) = self.files.lock() {
            files.insert((directory, path.to_string()), bytes);
        }
    }

    pub fn contains(&self, path: &str, directory: Option<Directory>) -> bool {
        self.files
            .lock()
            .map(|files| files.contains_key(&(directory, path.to_string())))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.files.lock().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_files<T>(
        &self,
        f: impl FnOnce(&mut HashMap<(Option<Directory>, String), Vec<u8>>) -> Result<T, ContentError>,
    ) -> Result<T, ContentError> {
        let mut files = self
            .files
            .lock()
            .map_err(|_| ContentError::Other("content store lock poisoned".to_string()))?;
        f(&mut files)
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn read_file(
        &self,
        path: &str,
        directory: Option<Directory>,
    ) -> Result<String, ContentError> {
        if directory.is_some() {
            validate_relative_path(path)?;
        }
        self.with_files(|files| {
            files
                .get(&(directory, path.to_string()))
                .map(|bytes| encode_base64(bytes))
                .ok_or_else(|| ContentError::NotFound(path.to_string()))
        })
    }

    async fn write_file(
        &self,
        path: &str,
        data: &str,
        directory: Directory,
    ) -> Result<(), ContentError> {
        validate_relative_path(path)?;
        let bytes = decode_base64(data)?;
        self.with_files(|files| {
            files.insert((Some(directory), path.to_string()), bytes);
            Ok(())
        })
    }

    async fn delete_file(&self, path: &str, directory: Directory) -> Result<(), ContentError> {
        validate_relative_path(path)?;
        self.with_files(|files| {
            files
                .remove(&(Some(directory), path.to_string()))
                .map(|_| ())
                .ok_or_else(|| ContentError::NotFound(path.to_string()))
        })
    }
}
