use crate::capture::{CaptureError, CaptureService};
use crate::content::{ContentError, ContentStore};
use crate::encoding::{blob_locator_to_base64, jpeg_data_url, FetchError};
use crate::models::{
    CaptureOptions, CapturedPhoto, Directory, PhotoGalleryConfig, PhotoRecord, Platform,
};
use crate::preferences::{MetadataStore, PreferencesError};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// Error type for photo gallery operations
#[derive(Debug)]
pub enum PhotoGalleryError {
    Capture(CaptureError),
    Content(ContentError),
    Preferences(PreferencesError),
    Fetch(FetchError),
    Serialization(serde_json::Error),
    MissingLocator(String),
}

impl std::fmt::Display for PhotoGalleryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PhotoGalleryError::Capture(e) => write!(f, "Capture error: {}", e),
            PhotoGalleryError::Content(e) => write!(f, "Content error: {}", e),
            PhotoGalleryError::Preferences(e) => write!(f, "Preferences error: {}", e),
            PhotoGalleryError::Fetch(e) => write!(f, "Fetch error: {}", e),
            PhotoGalleryError::Serialization(e) => write!(f, "Serialization error: {}", e),
            PhotoGalleryError::MissingLocator(msg) => write!(f, "Missing locator: {}", msg),
        }
    }
}

impl std::error::Error for PhotoGalleryError {}

impl From<CaptureError> for PhotoGalleryError {
    fn from(err: CaptureError) -> Self {
        PhotoGalleryError::Capture(err)
    }
}

impl From<ContentError> for PhotoGalleryError {
    fn from(err: ContentError) -> Self {
        PhotoGalleryError::Content(err)
    }
}

impl From<PreferencesError> for PhotoGalleryError {
    fn from(err: PreferencesError) -> Self {
        PhotoGalleryError::Preferences(err)
    }
}

impl From<FetchError> for PhotoGalleryError {
    fn from(err: FetchError) -> Self {
        PhotoGalleryError::Fetch(err)
    }
}

impl From<serde_json::Error> for PhotoGalleryError {
    fn from(err: serde_json::Error) -> Self {
        PhotoGalleryError::Serialization(err)
    }
}

fn unix_millis_now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Locators a web view renders without touching the stored file
fn is_renderable(locator: &str) -> bool {
    locator.starts_with("data:") || locator.starts_with("http://") || locator.starts_with("https://")
}

/// File name for a photo captured at `millis`
pub fn photo_file_name(millis: i64) -> String {
    format!("{}.jpeg", millis)
}

/// Newest-first list of photos, mirrored to the preference store
///
/// The preference store is the source of truth: every mutation persists the
/// full list before the in-memory copy changes. Mutations are serialized by
/// an internal lock so concurrent captures and deletes never lose writes.
/// Observers subscribe to a watch channel carrying the current list.
pub struct PhotoGalleryStore {
    config: PhotoGalleryConfig,
    capture: Arc<dyn CaptureService>,
    content: Arc<dyn ContentStore>,
    preferences: Arc<dyn MetadataStore>,
    http: reqwest::Client,
    photos: watch::Sender<Vec<PhotoRecord>>,
    mutation_lock: Mutex<()>,
    clock: fn() -> i64,
}

impl PhotoGalleryStore {
    pub fn new(
        config: PhotoGalleryConfig,
        capture: Arc<dyn CaptureService>,
        content: Arc<dyn ContentStore>,
        preferences: Arc<dyn MetadataStore>,
    ) -> Self {
        let (photos, _) = watch::channel(Vec::new());
        Self {
            config,
            capture,
            content,
            preferences,
            http: reqwest::Client::new(),
            photos,
            mutation_lock: Mutex::new(()),
            clock: unix_millis_now,
        }
    }

    /// Replace the millisecond clock used to name captured files
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &PhotoGalleryConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.config.platform
    }

    /// Snapshot of the current list, newest first
    pub fn photos(&self) -> Vec<PhotoRecord> {
        self.photos.borrow().clone()
    }

    /// Receiver notified whenever the list changes
    pub fn subscribe(&self) -> watch::Receiver<Vec<PhotoRecord>> {
        self.photos.subscribe()
    }

    /// Load the persisted list
    ///
    /// On web, every record's display path is rebuilt as a JPEG data URI from
    /// the stored file. A record whose file cannot be read keeps no display
    /// path instead of failing the whole load.
    pub async fn initialize(&self) -> Result<(), PhotoGalleryError> {
        let _guard = self.mutation_lock.lock().await;

        let mut photos = match self.load_persisted().await {
            Ok(photos) => photos,
            Err(e) => {
                log::error!("Failed to load saved photos: {}", e);
                return Err(e);
            }
        };

        if !self.config.platform.is_hybrid() {
            for photo in photos.iter_mut() {
                match self
                    .content
                    .read_file(&photo.filepath, Some(Directory::Data))
                    .await
                {
                    Ok(data) => photo.display_path = Some(jpeg_data_url(&data)),
                    Err(e) => {
                        log::warn!("Could not rehydrate photo {}: {}", photo.filepath, e);
                        photo.display_path = None;
                    }
                }
            }
        }

        log::info!("Loaded {} saved photos", photos.len());
        self.photos.send_replace(photos);
        Ok(())
    }

    /// Take a photo and save it; failures are logged and swallowed
    pub async fn capture_photo(&self) {
        if let Err(e) = self.try_capture_photo().await {
            log::error!("Could not take photo: {}", e);
        }
    }

    /// Take a photo and save it as `<unix millis>.jpeg`
    pub async fn try_capture_photo(&self) -> Result<PhotoRecord, PhotoGalleryError> {
        let photo = self.capture.get_photo(&CaptureOptions::default()).await?;
        let file_name = photo_file_name((self.clock)());
        self.save_picture(&photo, &file_name).await
    }

    /// Persist a captured photo under `file_name` and prepend it to the list
    ///
    /// Errors are logged and returned.
    pub async fn save_picture(
        &self,
        photo: &CapturedPhoto,
        file_name: &str,
    ) -> Result<PhotoRecord, PhotoGalleryError> {
        let result = self.save_picture_inner(photo, file_name).await;
        if let Err(e) = &result {
            log::error!("Failed to save photo {}: {}", file_name, e);
        }
        result
    }

    async fn save_picture_inner(
        &self,
        photo: &CapturedPhoto,
        file_name: &str,
    ) -> Result<PhotoRecord, PhotoGalleryError> {
        let base64_data = self.read_captured(photo).await?;

        let _guard = self.mutation_lock.lock().await;

        self.content
            .write_file(file_name, &base64_data, Directory::Data)
            .await?;

        let record = PhotoRecord::new(file_name, photo.display_locator());
        let mut photos = Vec::with_capacity(self.photos.borrow().len() + 1);
        photos.push(record.clone());
        photos.extend(self.photos.borrow().iter().cloned());

        self.persist(&photos).await?;
        self.photos.send_replace(photos);

        log::info!("Saved photo {}", file_name);
        Ok(record)
    }

    /// Base64 content of a freshly captured photo
    async fn read_captured(&self, photo: &CapturedPhoto) -> Result<String, PhotoGalleryError> {
        match self.config.platform {
            Platform::Hybrid => {
                let path = photo.path.as_deref().ok_or_else(|| {
                    PhotoGalleryError::MissingLocator("captured photo has no path".to_string())
                })?;
                Ok(self.content.read_file(path, None).await?)
            }
            Platform::Web => {
                let web_path = photo.web_path.as_deref().ok_or_else(|| {
                    PhotoGalleryError::MissingLocator("captured photo has no web path".to_string())
                })?;
                Ok(blob_locator_to_base64(&self.http, web_path).await?)
            }
        }
    }

    /// Image source the UI can show for `photo`
    ///
    /// A data URI or http(s) display path is returned as is. Anything else
    /// (native paths, stale blob URLs, no path) is served from the stored
    /// file as a JPEG data URI.
    pub async fn display_source(&self, photo: &PhotoRecord) -> Result<String, PhotoGalleryError> {
        if let Some(locator) = photo.display_path.as_deref().filter(|l| is_renderable(l)) {
            return Ok(locator.to_string());
        }
        let data = self
            .content
            .read_file(&photo.filepath, Some(Directory::Data))
            .await?;
        Ok(jpeg_data_url(&data))
    }

    /// Remove a photo; failures are logged and swallowed
    pub async fn delete_photo(&self, photo: &PhotoRecord) {
        if let Err(e) = self.try_delete_photo(photo).await {
            log::error!("Could not delete photo {}: {}", photo.filepath, e);
        }
    }

    /// Remove the file and every record with the same `filepath`
    ///
    /// A file that is already gone counts as deleted.
    pub async fn try_delete_photo(&self, photo: &PhotoRecord) -> Result<(), PhotoGalleryError> {
        let _guard = self.mutation_lock.lock().await;

        match self
            .content
            .delete_file(&photo.filepath, Directory::Data)
            .await
        {
            Ok(()) => {}
            Err(ContentError::NotFound(path)) => {
                log::warn!("Photo file {} already missing, removing record", path);
            }
            Err(e) => return Err(e.into()),
        }

        let photos: Vec<PhotoRecord> = self
            .photos
            .borrow()
            .iter()
            .filter(|p| p.filepath != photo.filepath)
            .cloned()
            .collect();

        self.persist(&photos).await?;
        self.photos.send_replace(photos);

        log::info!("Deleted photo {}", photo.filepath);
        Ok(())
    }

    async fn load_persisted(&self) -> Result<Vec<PhotoRecord>, PhotoGalleryError> {
        let value = self.preferences.get(&self.config.preferences_key).await?;
        Ok(PhotoRecord::list_from_json(value.as_deref())?)
    }

    async fn persist(&self, photos: &[PhotoRecord]) -> Result<(), PhotoGalleryError> {
        let json = PhotoRecord::list_to_json(photos)?;
        self.preferences
            .set(&self.config.preferences_key, &json)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryContentStore;
    use crate::preferences::MemoryPreferences;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Hands out queued photos, or the queued error
    #[derive(Default)]
    struct FakeCamera {
        shots: std::sync::Mutex<VecDeque<Result<CapturedPhoto, CaptureError>>>,
    }

    impl FakeCamera {
        fn with(shots: Vec<Result<CapturedPhoto, CaptureError>>) -> Arc<Self> {
            Arc::new(Self {
                shots: std::sync::Mutex::new(shots.into()),
            })
        }
    }

    #[async_trait]
    impl CaptureService for FakeCamera {
        async fn get_photo(
            &self,
            options: &CaptureOptions,
        ) -> Result<CapturedPhoto, CaptureError> {
            assert_eq!(options.quality, 100);
            self.shots
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(CaptureError::Cancelled("no more shots".to_string())))
        }
    }

    static CLOCK: AtomicI64 = AtomicI64::new(0);

    fn ticking_clock() -> i64 {
        CLOCK.fetch_add(1000, Ordering::SeqCst) + 1000
    }

    struct Fixture {
        content: Arc<MemoryContentStore>,
        prefs: Arc<MemoryPreferences>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                content: Arc::new(MemoryContentStore::new()),
                prefs: Arc::new(MemoryPreferences::new()),
            }
        }

        fn store(&self, platform: Platform, camera: Arc<FakeCamera>) -> PhotoGalleryStore {
            let config = PhotoGalleryConfig {
                platform,
                ..Default::default()
            };
            PhotoGalleryStore::new(config, camera, self.content.clone(), self.prefs.clone())
        }

        async fn persisted(&self) -> Vec<PhotoRecord> {
            let value = self.prefs.get("photos").await.unwrap();
            PhotoRecord::list_from_json(value.as_deref()).unwrap()
        }
    }

    /// Reads from the wrapped preferences, rejects every write
    struct ReadOnlyPreferences(Arc<MemoryPreferences>);

    #[async_trait]
    impl MetadataStore for ReadOnlyPreferences {
        async fn get(&self, key: &str) -> Result<Option<String>, PreferencesError> {
            self.0.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), PreferencesError> {
            Err(PreferencesError::Other("disk full".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<(), PreferencesError> {
            Err(PreferencesError::Other("disk full".to_string()))
        }
    }

    fn filepaths(photos: &[PhotoRecord]) -> Vec<&str> {
        photos.iter().map(|p| p.filepath.as_str()).collect()
    }

    #[tokio::test]
    async fn test_capture_and_delete_scenario() {
        let fixture = Fixture::new();
        fixture
            .content
            .insert_file("/camera/a.jpg", None, b"AAAA".to_vec());
        fixture
            .content
            .insert_file("/camera/b.jpg", None, b"BBBB".to_vec());

        fn clock() -> i64 {
            static NEXT: AtomicI64 = AtomicI64::new(1000);
            NEXT.fetch_add(1000, Ordering::SeqCst)
        }

        let camera = FakeCamera::with(vec![
            Ok(CapturedPhoto::native("/camera/a.jpg")),
            Ok(CapturedPhoto::native("/camera/b.jpg")),
        ]);
        let store = fixture.store(Platform::Hybrid, camera).with_clock(clock);
        store.initialize().await.unwrap();

        store.capture_photo().await;
        assert_eq!(filepaths(&store.photos()), vec!["1000.jpeg"]);

        store.capture_photo().await;
        assert_eq!(filepaths(&store.photos()), vec!["2000.jpeg", "1000.jpeg"]);
        assert_eq!(fixture.persisted().await, store.photos());
        assert_eq!(
            store.photos()[0].display_path.as_deref(),
            Some("/camera/b.jpg")
        );

        let newest = store.photos()[0].clone();
        store.delete_photo(&newest).await;

        assert_eq!(filepaths(&store.photos()), vec!["1000.jpeg"]);
        assert_eq!(fixture.persisted().await, store.photos());
        assert!(!fixture.content.contains("2000.jpeg", Some(Directory::Data)));
        assert!(fixture.content.contains("1000.jpeg", Some(Directory::Data)));
    }

    #[tokio::test]
    async fn test_save_picture_round_trip() {
        let fixture = Fixture::new();
        let store = fixture.store(Platform::Web, FakeCamera::with(vec![]));

        let photo = CapturedPhoto::web("data:image/jpeg;base64,QUFBQQ==");
        let record = store.save_picture(&photo, "1000.jpeg").await.unwrap();

        assert_eq!(record.filepath, "1000.jpeg");
        assert_eq!(
            record.display_path.as_deref(),
            Some("data:image/jpeg;base64,QUFBQQ==")
        );
        assert_eq!(
            fixture
                .content
                .read_file("1000.jpeg", Some(Directory::Data))
                .await
                .unwrap(),
            "QUFBQQ=="
        );
        assert_eq!(store.photos(), vec![record]);
    }

    #[tokio::test]
    async fn test_save_picture_propagates_errors() {
        let fixture = Fixture::new();
        let store = fixture.store(Platform::Hybrid, FakeCamera::with(vec![]));

        let missing = store
            .save_picture(&CapturedPhoto::native("/camera/nope.jpg"), "1.jpeg")
            .await;
        assert!(matches!(
            missing,
            Err(PhotoGalleryError::Content(ContentError::NotFound(_)))
        ));

        let no_path = store.save_picture(&CapturedPhoto::web("data:,"), "2.jpeg").await;
        assert!(matches!(no_path, Err(PhotoGalleryError::MissingLocator(_))));

        assert!(store.photos().is_empty());
        assert_eq!(fixture.prefs.write_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_preference_write_keeps_list() {
        let fixture = Fixture::new();
        let writable = fixture.store(Platform::Web, FakeCamera::with(vec![]));
        writable
            .save_picture(&CapturedPhoto::web("data:image/jpeg;base64,QUFBQQ=="), "1000.jpeg")
            .await
            .unwrap();

        let store = PhotoGalleryStore::new(
            PhotoGalleryConfig {
                platform: Platform::Web,
                ..Default::default()
            },
            FakeCamera::with(vec![]),
            fixture.content.clone(),
            Arc::new(ReadOnlyPreferences(fixture.prefs.clone())),
        );
        store.initialize().await.unwrap();
        let mut rx = store.subscribe();

        let saved = store
            .save_picture(&CapturedPhoto::web("data:image/jpeg;base64,QkJCQg=="), "2000.jpeg")
            .await;
        assert!(matches!(saved, Err(PhotoGalleryError::Preferences(_))));
        assert_eq!(filepaths(&store.photos()), vec!["1000.jpeg"]);

        let existing = store.photos()[0].clone();
        let deleted = store.try_delete_photo(&existing).await;
        assert!(matches!(deleted, Err(PhotoGalleryError::Preferences(_))));
        assert_eq!(filepaths(&store.photos()), vec!["1000.jpeg"]);

        store.delete_photo(&existing).await;
        assert_eq!(filepaths(&store.photos()), vec!["1000.jpeg"]);

        assert!(!rx.has_changed().unwrap());
        assert_eq!(filepaths(&fixture.persisted().await), vec!["1000.jpeg"]);
    }

    #[tokio::test]
    async fn test_display_source_reads_stored_file() {
        let fixture = Fixture::new();
        fixture
            .content
            .insert_file("1000.jpeg", Some(Directory::Data), b"AAAA".to_vec());
        let store = fixture.store(Platform::Hybrid, FakeCamera::with(vec![]));

        let inline = PhotoRecord::new(
            "1000.jpeg",
            Some("data:image/jpeg;base64,QkJCQg==".to_string()),
        );
        assert_eq!(
            store.display_source(&inline).await.unwrap(),
            "data:image/jpeg;base64,QkJCQg=="
        );

        let native = PhotoRecord::new("1000.jpeg", Some("/camera/gone.jpg".to_string()));
        assert_eq!(
            store.display_source(&native).await.unwrap(),
            "data:image/jpeg;base64,QUFBQQ=="
        );

        let missing = PhotoRecord::new("2000.jpeg", None);
        assert!(matches!(
            store.display_source(&missing).await,
            Err(PhotoGalleryError::Content(ContentError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_capture_changes_nothing() {
        let fixture = Fixture::new();
        let camera = FakeCamera::with(vec![Err(CaptureError::Cancelled(
            "User cancelled photos app".to_string(),
        ))]);
        let store = fixture.store(Platform::Hybrid, camera);

        store.capture_photo().await;

        assert!(store.photos().is_empty());
        assert_eq!(fixture.prefs.write_count(), 0);
        assert!(fixture.content.is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_initialize_omits_record() {
        let fixture = Fixture::new();
        let store = fixture.store(Platform::Web, FakeCamera::with(vec![]));

        let a = store
            .save_picture(&CapturedPhoto::web("data:image/jpeg;base64,QUFBQQ=="), "1000.jpeg")
            .await
            .unwrap();
        let b = store
            .save_picture(&CapturedPhoto::web("data:image/jpeg;base64,QkJCQg=="), "2000.jpeg")
            .await
            .unwrap();

        store.delete_photo(&a).await;

        let reloaded = fixture.store(Platform::Web, FakeCamera::with(vec![]));
        reloaded.initialize().await.unwrap();

        assert_eq!(filepaths(&reloaded.photos()), vec![b.filepath.as_str()]);
        assert!(!fixture.content.contains("1000.jpeg", Some(Directory::Data)));
    }

    #[tokio::test]
    async fn test_web_initialize_rehydrates_data_urls() {
        let fixture = Fixture::new();
        fixture
            .content
            .insert_file("1000.jpeg", Some(Directory::Data), b"AAAA".to_vec());
        fixture
            .content
            .insert_file("2000.jpeg", Some(Directory::Data), b"BBBB".to_vec());
        fixture
            .prefs
            .set(
                "photos",
                r#"[{"filepath":"2000.jpeg","webviewPath":"blob:stale"},{"filepath":"1000.jpeg"}]"#,
            )
            .await
            .unwrap();

        let store = fixture.store(Platform::Web, FakeCamera::with(vec![]));
        store.initialize().await.unwrap();

        let photos = store.photos();
        assert_eq!(
            photos[0].display_path.as_deref(),
            Some("data:image/jpeg;base64,QkJCQg==")
        );
        assert_eq!(
            photos[1].display_path.as_deref(),
            Some("data:image/jpeg;base64,QUFBQQ==")
        );
    }

    #[tokio::test]
    async fn test_hybrid_initialize_keeps_display_paths() {
        let fixture = Fixture::new();
        fixture
            .prefs
            .set("photos", r#"[{"filepath":"1000.jpeg","webviewPath":"/camera/a.jpg"}]"#)
            .await
            .unwrap();

        let store = fixture.store(Platform::Hybrid, FakeCamera::with(vec![]));
        store.initialize().await.unwrap();

        assert_eq!(
            store.photos(),
            vec![PhotoRecord::new("1000.jpeg", Some("/camera/a.jpg".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_broken_record_does_not_abort_load() {
        let fixture = Fixture::new();
        fixture
            .content
            .insert_file("1000.jpeg", Some(Directory::Data), b"AAAA".to_vec());
        fixture
            .prefs
            .set(
                "photos",
                r#"[{"filepath":"missing.jpeg","webviewPath":"blob:gone"},{"filepath":"1000.jpeg"}]"#,
            )
            .await
            .unwrap();

        let store = fixture.store(Platform::Web, FakeCamera::with(vec![]));
        store.initialize().await.unwrap();

        let photos = store.photos();
        assert_eq!(filepaths(&photos), vec!["missing.jpeg", "1000.jpeg"]);
        assert_eq!(photos[0].display_path, None);
        assert!(photos[1].display_path.is_some());
    }

    #[tokio::test]
    async fn test_initialize_fails_on_corrupt_list() {
        let fixture = Fixture::new();
        fixture.prefs.set("photos", "{not json").await.unwrap();

        let store = fixture.store(Platform::Web, FakeCamera::with(vec![]));
        let result = store.initialize().await;

        assert!(matches!(result, Err(PhotoGalleryError::Serialization(_))));
        assert!(store.photos().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_file_still_removes_record() {
        let fixture = Fixture::new();
        fixture
            .prefs
            .set("photos", r#"[{"filepath":"1000.jpeg"}]"#)
            .await
            .unwrap();

        let store = fixture.store(Platform::Hybrid, FakeCamera::with(vec![]));
        store.initialize().await.unwrap();

        store
            .try_delete_photo(&PhotoRecord::new("1000.jpeg", None))
            .await
            .unwrap();

        assert!(store.photos().is_empty());
        assert!(fixture.persisted().await.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_captures_keep_every_record() {
        let fixture = Fixture::new();
        let shots = (0..8)
            .map(|i| {
                let path = format!("/camera/{}.jpg", i);
                fixture.content.insert_file(&path, None, b"AAAA".to_vec());
                Ok(CapturedPhoto::native(path))
            })
            .collect();

        let store = Arc::new(
            fixture
                .store(Platform::Hybrid, FakeCamera::with(shots))
                .with_clock(ticking_clock),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.try_capture_photo().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.photos().len(), 8);
        assert_eq!(fixture.persisted().await, store.photos());
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let fixture = Fixture::new();
        let store = fixture.store(Platform::Web, FakeCamera::with(vec![]));
        let mut rx = store.subscribe();

        store
            .save_picture(&CapturedPhoto::web("data:image/jpeg;base64,QUFBQQ=="), "1000.jpeg")
            .await
            .unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(filepaths(&rx.borrow_and_update()), vec!["1000.jpeg"]);
    }
}
