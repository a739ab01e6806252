//! Lazy gallery error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LazyError {
    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Gallery error: {0}")]
    Gallery(#[from] vitrine_core::GalleryError),
}
