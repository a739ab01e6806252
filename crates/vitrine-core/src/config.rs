//! Gallery configuration

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::GalleryError;
use crate::Result;

pub const DEFAULT_MANIFEST_URL: &str = "images.json";
pub const DEFAULT_IMAGE_ROOT: &str = "images";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Manifest location, absolute or relative to `base_url`
    pub manifest_url: String,
    /// URL of the hosting page, used to resolve relative locations
    pub base_url: String,
    /// Directory prefix for image sources
    pub image_root: String,
    /// Upper bound on the manifest request
    pub request_timeout_secs: u64,
    /// User agent sent with the manifest request
    pub user_agent: String,
    /// `src` of the embedding script tag that carries the manifest attribute
    pub script_src: String,
    /// Attribute on the embedding tag holding the manifest URL
    pub url_attribute: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            base_url: base_url.into(),
            image_root: DEFAULT_IMAGE_ROOT.to_string(),
            request_timeout_secs: 30,
            user_agent: format!("Vitrine/{}", env!("CARGO_PKG_VERSION")),
            script_src: "script.js".to_string(),
            url_attribute: "data-json-url".to_string(),
        }
    }

    pub fn with_manifest_url(mut self, manifest_url: impl Into<String>) -> Self {
        self.manifest_url = manifest_url.into();
        self
    }

    /// Build a config from the hosting page's markup.
    ///
    /// The manifest URL comes from the `data-json-url` attribute of the
    /// `<script src="script.js">` tag. A missing or empty attribute falls
    /// back to `images.json`.
    pub fn from_page_html(html: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut config = Self::new(base_url);
        if let Some(url) = config.read_manifest_attribute(html)? {
            config.manifest_url = url;
        }
        Ok(config)
    }

    fn read_manifest_attribute(&self, html: &str) -> Result<Option<String>> {
        let selector = Selector::parse(&format!("script[src=\"{}\"]", self.script_src))
            .map_err(|e| GalleryError::Config(format!("bad script selector: {e}")))?;

        let doc = Html::parse_document(html);
        let value = doc
            .select(&selector)
            .next()
            .and_then(|el| el.value().attr(&self.url_attribute))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Ok(value)
    }

    /// Absolute manifest location
    pub fn manifest_location(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)?;
        Ok(base.join(&self.manifest_url)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("http://localhost/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.manifest_url, "images.json");
        assert_eq!(config.image_root, "images");
        assert_eq!(
            config.manifest_location().unwrap().as_str(),
            "http://localhost/images.json"
        );
    }

    #[test]
    fn test_manifest_url_from_page() {
        let html = r#"<html><head>
            <script src="script.js" data-json-url="data/holidays.json"></script>
            </head><body></body></html>"#;

        let config = Config::from_page_html(html, "https://example.com/gallery/").unwrap();
        assert_eq!(config.manifest_url, "data/holidays.json");
        assert_eq!(
            config.manifest_location().unwrap().as_str(),
            "https://example.com/gallery/data/holidays.json"
        );
    }

    #[test]
    fn test_missing_or_empty_attribute_falls_back() {
        let without = r#"<script src="script.js"></script>"#;
        let config = Config::from_page_html(without, "https://example.com/").unwrap();
        assert_eq!(config.manifest_url, "images.json");

        let empty = r#"<script src="script.js" data-json-url=""></script>"#;
        let config = Config::from_page_html(empty, "https://example.com/").unwrap();
        assert_eq!(config.manifest_url, "images.json");

        let other_script = r#"<script src="vendor.js" data-json-url="x.json"></script>"#;
        let config = Config::from_page_html(other_script, "https://example.com/").unwrap();
        assert_eq!(config.manifest_url, "images.json");
    }

    #[test]
    fn test_invalid_base_url() {
        let config = Config::new("not a url");
        assert!(matches!(
            config.manifest_location(),
            Err(GalleryError::InvalidUrl(_))
        ));
    }
}
