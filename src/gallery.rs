// Wiring of the photo gallery store for this app and the Dioxus hook on top.

use crate::error::AppError;
use crate::filesystem;
use dioxus::prelude::*;
use photo_gallery::{
    CameraCapture, FsContentStore, MemoryPreferences, MetadataStore, PhotoGalleryConfig,
    PhotoGalleryStore, PhotoRecord, SqlitePreferences,
};
use std::path::Path;
use std::sync::Arc;

/// Gallery configuration rooted at `data_dir`, with `gallery.toml` applied
pub fn load_config(data_dir: &Path) -> Result<PhotoGalleryConfig, AppError> {
    let defaults = PhotoGalleryConfig::with_data_dir(filesystem::get_photo_dir(data_dir));
    let config_path = filesystem::get_config_path(data_dir);

    match std::fs::read_to_string(&config_path) {
        Ok(contents) => {
            log::info!("Applying gallery config from {:?}", config_path);
            Ok(defaults.apply_toml(&contents)?)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(defaults),
        Err(e) => Err(e.into()),
    }
}

pub fn open_preferences(data_dir: &Path) -> Result<SqlitePreferences, AppError> {
    Ok(SqlitePreferences::open(filesystem::get_preferences_path(
        data_dir,
    ))?)
}

/// Build the store for this device
///
/// Falls back to default settings and in-memory preferences when the
/// config or the preference database is unusable, so the UI still starts.
pub fn open_gallery_store(data_dir: &Path) -> PhotoGalleryStore {
    let config = load_config(data_dir).unwrap_or_else(|e| {
        log::error!("Invalid gallery config, using defaults: {}", e);
        PhotoGalleryConfig::with_data_dir(filesystem::get_photo_dir(data_dir))
    });

    let preferences: Arc<dyn MetadataStore> = match open_preferences(data_dir) {
        Ok(prefs) => Arc::new(prefs),
        Err(e) => {
            log::error!("Could not open preferences, photos will not persist: {}", e);
            Arc::new(MemoryPreferences::new())
        }
    };

    log::info!(
        "Photo gallery: platform={:?}, photos in {:?}",
        config.platform,
        config.data_dir
    );

    PhotoGalleryStore::new(
        config.clone(),
        Arc::new(CameraCapture::default()),
        Arc::new(FsContentStore::from_config(&config)),
        preferences,
    )
}

/// Photo list and actions of the gallery held in context
#[derive(Clone)]
pub struct UsePhotoGallery {
    pub photos: Signal<Vec<PhotoRecord>>,
    store: Arc<PhotoGalleryStore>,
}

impl UsePhotoGallery {
    /// Capture a photo in the background; failures only end up in the log
    pub fn take_photo(&self) {
        let store = self.store.clone();
        spawn(async move {
            store.capture_photo().await;
        });
    }

    pub fn delete_photo(&self, record: PhotoRecord) {
        let store = self.store.clone();
        spawn(async move {
            store.delete_photo(&record).await;
        });
    }
}

/// Loads the saved photos once and keeps `photos` in sync with the store
pub fn use_photo_gallery() -> UsePhotoGallery {
    let store = use_context::<Arc<PhotoGalleryStore>>();
    let mut photos = use_signal(Vec::<PhotoRecord>::new);

    let loader = store.clone();
    use_hook(move || {
        spawn(async move {
            let mut updates = loader.subscribe();
            if let Err(e) = loader.initialize().await {
                log::error!("Loading saved photos failed: {}", e);
            }
            loop {
                let current = updates.borrow_and_update().clone();
                photos.set(current);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        });
    });

    UsePhotoGallery { photos, store }
}
