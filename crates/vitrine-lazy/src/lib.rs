//! Vitrine Lazy Gallery
//!
//! Every folder's files flattened into one gallery. Images carry their real
//! source in `data-src` and only receive `src` once they become visible:
//! - one shared intersection observer, injected at mount
//! - one-shot loading per image, never retried
//! - `loaded` class applied when the host reports the image loaded

mod error;
mod events;
mod gallery;
mod image;
mod observer;

pub use error::LazyError;
pub use events::PageEvent;
pub use gallery::{flatten, load_gallery, try_load_gallery, FlatEntry, LazyGallery, GALLERY_ID};
pub use image::{LazyImage, LazyState};
pub use observer::{IntersectionEntry, IntersectionObserver, ObserverOptions};

pub type Result<T> = std::result::Result<T, LazyError>;
