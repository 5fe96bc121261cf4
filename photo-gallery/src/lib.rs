//! # Photo Gallery
//!
//! Photo capture and gallery state management for hybrid mobile/web apps.
//!
//! This crate provides:
//! - A [`PhotoGalleryStore`] holding the newest-first list of captured photos
//! - Pluggable camera, file content and key-value preference backends
//! - Rehydration of stored photos as `data:` URIs on web execution mode
//!
//! ## Platform Separation
//!
//! The store only talks to the [`CaptureService`], [`ContentStore`] and
//! [`MetadataStore`] traits. Resolving platform directories stays in the
//! application crate; the Android camera bridge lives in [`picker`].
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use photo_gallery::{
//!     CameraCapture, FsContentStore, PhotoGalleryConfig, PhotoGalleryStore, SqlitePreferences,
//! };
//!
//! let config = PhotoGalleryConfig {
//!     data_dir: "/path/to/data".into(),
//!     ..Default::default()
//! };
//!
//! let store = PhotoGalleryStore::new(
//!     config.clone(),
//!     Arc::new(CameraCapture::default()),
//!     Arc::new(FsContentStore::from_config(&config)),
//!     Arc::new(SqlitePreferences::open(config.data_dir.join("preferences.db"))?),
//! );
//!
//! store.initialize().await?;
//! store.capture_photo().await;
//! ```

pub mod capture;
pub mod content;
pub mod encoding;
pub mod models;
pub mod picker;
pub mod preferences;
pub mod schema;
pub mod store;

pub use capture::{CameraCapture, CaptureError, CaptureService};
pub use content::{ContentError, ContentStore, FsContentStore, MemoryContentStore};
pub use encoding::{blob_locator_to_base64, jpeg_data_url, strip_data_url, FetchError};
pub use models::{
    CameraResultType, CameraSource, CaptureOptions, CapturedPhoto, Directory, PhotoGalleryConfig,
    PhotoRecord, Platform,
};
pub use preferences::{MemoryPreferences, MetadataStore, PreferencesError, SqlitePreferences};
pub use schema::init_preferences_schema;
pub use store::{PhotoGalleryError, PhotoGalleryStore};
