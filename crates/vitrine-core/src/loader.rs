//! Manifest loader
//!
//! One GET per load. A non-2xx status is a `Fetch` error, a body that is not
//! a manifest of the requested shape is a `Parse` error, and a transport
//! failure before any status is a `Network` error.

use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::Config;
use crate::error::GalleryError;
use crate::manifest::{FlatManifest, TabbedManifest};
use crate::Result;

pub struct ManifestLoader {
    client: Client,
    location: Url,
}

impl ManifestLoader {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            location: config.manifest_location()?,
        })
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    async fn fetch_body(&self) -> Result<String> {
        tracing::debug!(url = %self.location, "Fetching manifest");

        let response = self.client.get(self.location.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GalleryError::Fetch {
                status: status.as_u16(),
                url: self.location.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Load the array-valued manifest used by the tabbed renderer
    pub async fn load_tabbed(&self) -> Result<TabbedManifest> {
        let body = self.fetch_body().await?;
        let manifest = TabbedManifest::from_json(&body)?;
        tracing::info!(
            url = %self.location,
            galleries = manifest.len(),
            "Loaded tabbed manifest"
        );
        Ok(manifest)
    }

    /// Load the `files`-wrapped manifest used by the flat renderer
    pub async fn load_flat(&self) -> Result<FlatManifest> {
        let body = self.fetch_body().await?;
        let manifest = FlatManifest::from_json(&body)?;
        tracing::info!(
            url = %self.location,
            folders = manifest.len(),
            "Loaded flat manifest"
        );
        Ok(manifest)
    }
}
