//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("HTTP error {status} while fetching {url}")]
    Fetch { status: u16, url: String },

    #[error("Manifest parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Element not found: #{0}")]
    DomNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for GalleryError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => GalleryError::Fetch {
                status: status.as_u16(),
                url: e.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => GalleryError::Network(e.to_string()),
        }
    }
}

impl From<url::ParseError> for GalleryError {
    fn from(e: url::ParseError) -> Self {
        GalleryError::InvalidUrl(e.to_string())
    }
}
