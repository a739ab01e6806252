//! Vitrine Core
//!
//! Shared layer for the gallery renderers: configuration, the manifest
//! loader, manifest types and the in-memory document they render into.

mod config;
pub mod dom;
mod error;
mod loader;
pub mod manifest;
mod page;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::{Config, DEFAULT_IMAGE_ROOT, DEFAULT_MANIFEST_URL};
pub use dom::{Document, Element, NodeId};
pub use error::GalleryError;
pub use loader::ManifestLoader;
pub use manifest::{FlatManifest, Folder, Gallery, ImageEntry, TabbedManifest};
pub use page::Page;

pub type Result<T> = std::result::Result<T, GalleryError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
