use dioxus::prelude::*;
use std::sync::Arc;

mod components;
mod error;
mod filesystem;
mod gallery;

use components::GalleryScreen;

fn main() {
    init_logging();
    dioxus::launch(App);
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("photo-album"),
    );

    #[cfg(not(target_os = "android"))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        let data_dir = filesystem::get_app_data_dir();
        Arc::new(gallery::open_gallery_store(&data_dir))
    });

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif;",
            div { style: "flex: 1; overflow-y: auto;",
                GalleryScreen {}
            }
        }
    }
}
