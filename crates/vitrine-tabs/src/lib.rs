//! Vitrine Tabbed Gallery
//!
//! One tab button per manifest gallery, in manifest order. Exactly one tab
//! is active; selecting a tab replaces the rendered gallery.

mod error;
mod gallery;
mod state;
mod style;
mod tab;

pub use error::TabError;
pub use gallery::{
    load_galleries, try_load_galleries, TabbedGallery, GALLERY_CONTAINER_ID, TABS_CONTAINER_ID,
};
pub use state::TabState;
pub use style::{GRID_CLASS, STYLESHEET_ID};
pub use tab::Tab;

pub type Result<T> = std::result::Result<T, TabError>;
