use crate::gallery::use_photo_gallery;
use dioxus::prelude::*;
use photo_gallery::{PhotoGalleryStore, PhotoRecord};
use std::sync::Arc;

#[component]
pub fn GalleryScreen() -> Element {
    let gallery = use_photo_gallery();
    let photos = gallery.photos;
    let camera = gallery.clone();

    rsx! {
        div { style: "padding: 16px; max-width: 800px; margin: 0 auto;",
            // Header
            div { style: "display: flex; align-items: center; justify-content: space-between; margin-bottom: 24px;",
                h1 { style: "margin: 0; font-size: 26px; color: #0066cc; font-weight: 700;", "Photos" }
                button {
                    style: "padding: 10px 14px; background: #0066cc; color: white; border: none; border-radius: 8px; font-size: 14px; cursor: pointer;",
                    onclick: move |_| camera.take_photo(),
                    "📷 Take photo"
                }
            }

            if photos().is_empty() {
                div { style: "padding: 48px 16px; text-align: center; color: #999; font-size: 14px;",
                    "No photos yet"
                }
            }

            div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(128px, 1fr)); gap: 8px;",
                for photo in photos() {
                    {
                        let actions = gallery.clone();
                        rsx! {
                            PhotoTile {
                                key: "{photo.filepath}",
                                record: photo.clone(),
                                on_delete: move |record: PhotoRecord| actions.delete_photo(record),
                            }
                        }
                    }
                }
            }
        }
    }
}

/// One photo of the grid
///
/// The image source is resolved once when the tile mounts, tiles are keyed
/// by file name so re-renders of the grid reuse it.
#[component]
fn PhotoTile(record: PhotoRecord, on_delete: EventHandler<PhotoRecord>) -> Element {
    let store = use_context::<Arc<PhotoGalleryStore>>();
    let loading = record.clone();
    let source = use_resource(move || {
        let store = store.clone();
        let record = loading.clone();
        async move {
            match store.display_source(&record).await {
                Ok(url) => Some(url),
                Err(e) => {
                    log::warn!("Cannot show photo {}: {}", record.filepath, e);
                    None
                }
            }
        }
    });

    let deleted = record.clone();

    rsx! {
        div { style: "position: relative; aspect-ratio: 1/1; background: #f0f0f0; border-radius: 8px; overflow: hidden;",
            match source() {
                Some(Some(url)) => rsx! {
                    img { src: url, alt: record.filepath.clone(), style: "width: 100%; height: 100%; object-fit: cover;" }
                },
                Some(None) => rsx! {
                    div { style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; color: #999; font-size: 32px;", "⚠️" }
                },
                None => rsx! {
                    div { style: "width: 100%; height: 100%; display: flex; align-items: center; justify-content: center; color: #999;", "⏳" }
                },
            }
            button {
                style: "position: absolute; top: 6px; right: 6px; width: 28px; height: 28px; background: rgba(0,0,0,0.55); color: white; border: none; border-radius: 14px; cursor: pointer;",
                onclick: move |_| on_delete.call(deleted.clone()),
                "✕"
            }
        }
    }
}
