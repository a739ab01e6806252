//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Gallery not found: {0}")]
    NotFound(String),

    #[error("No tab owns {0}")]
    UnknownControl(String),

    #[error("Gallery error: {0}")]
    Gallery(#[from] vitrine_core::GalleryError),
}
