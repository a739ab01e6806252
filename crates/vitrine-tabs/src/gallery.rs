//! Tabbed gallery renderer

use vitrine_core::{
    Config, Document, ImageEntry, ManifestLoader, NodeId, Page, TabbedManifest,
};

use crate::error::TabError;
use crate::style::{Stylesheet, GRID_CLASS};
use crate::tab::Tab;
use crate::Result;

pub const TABS_CONTAINER_ID: &str = "tabs-container";
pub const GALLERY_CONTAINER_ID: &str = "gallery-container";

const BLOCK_STYLES: &[(&str, &str)] = &[
    ("display", "flex"),
    ("flex-direction", "column"),
    ("align-items", "center"),
    ("margin", "10px"),
];

const IMAGE_STYLES: &[(&str, &str)] = &[
    ("width", "100%"),
    ("border-radius", "5px"),
    ("box-shadow", "0 4px 6px rgba(0, 0, 0, 0.1)"),
    ("object-fit", "cover"),
];

const CAPTION_STYLES: &[(&str, &str)] = &[
    ("text-align", "center"),
    ("margin-top", "5px"),
    ("font-size", "14px"),
    ("color", "#555"),
];

pub struct TabbedGallery {
    page: Page,
    tabs_container: NodeId,
    gallery_container: NodeId,
    image_root: String,
    stylesheet: Stylesheet,
    manifest: TabbedManifest,
    tabs: Vec<Tab>,
}

impl TabbedGallery {
    /// Bind to the page's `#tabs-container` and `#gallery-container`.
    ///
    /// Fails with `DomNotFound` before anything is rendered if either is
    /// missing.
    pub fn mount(page: Page, config: &Config) -> Result<Self> {
        let tabs_container = page.require_element(TABS_CONTAINER_ID)?;
        let gallery_container = page.require_element(GALLERY_CONTAINER_ID)?;

        Ok(Self {
            page,
            tabs_container,
            gallery_container,
            image_root: config.image_root.clone(),
            stylesheet: Stylesheet::default(),
            manifest: TabbedManifest::default(),
            tabs: Vec::new(),
        })
    }

    /// Create one tab per gallery and render the first one.
    ///
    /// Calling it again replaces the previous tabs.
    pub fn build_tabs(&mut self, manifest: TabbedManifest) -> Result<()> {
        {
            let mut doc = self.page.write();
            doc.clear_children(self.tabs_container);
            self.tabs = manifest
                .names()
                .map(|name| Tab::create(&mut doc, self.tabs_container, name))
                .collect();
        }
        self.manifest = manifest;

        tracing::info!(tabs = self.tabs.len(), "Built gallery tabs");

        match self.tabs.first() {
            Some(first) => {
                let name = first.name.clone();
                self.on_tab_selected(&name)
            }
            None => Ok(()),
        }
    }

    /// Move the active marker to `name` and render its gallery
    pub fn on_tab_selected(&mut self, name: &str) -> Result<()> {
        let entries = self
            .manifest
            .get(name)
            .ok_or_else(|| TabError::NotFound(name.to_string()))?;

        {
            let mut doc = self.page.write();
            for tab in &mut self.tabs {
                tab.deactivate(&mut doc);
            }
            if let Some(tab) = self.tabs.iter_mut().find(|t| t.name == name) {
                tab.activate(&mut doc);
            }
        }

        tracing::debug!(gallery = %name, "Tab selected");

        let entries = entries.to_vec();
        self.render_gallery(name, &entries);
        Ok(())
    }

    /// Dispatch a click on a tab button
    pub fn click(&mut self, button: NodeId) -> Result<()> {
        let name = self
            .tabs
            .iter()
            .find(|t| t.button == button)
            .map(|t| t.name.clone())
            .ok_or_else(|| TabError::UnknownControl(button.to_string()))?;
        self.on_tab_selected(&name)
    }

    /// Replace the display region with `name`'s heading and image blocks
    pub fn render_gallery(&mut self, name: &str, entries: &[ImageEntry]) {
        let mut doc = self.page.write();
        let container = self.gallery_container;
        doc.clear_children(container);

        let title = doc.create_element("h2");
        doc.set_text(title, name);
        doc.append_child(container, title);

        for entry in entries {
            let block = self.image_block(&mut doc, name, entry);
            doc.append_child(container, block);
        }

        doc.add_class(container, GRID_CLASS);
        self.stylesheet.apply(&mut doc);

        tracing::debug!(gallery = %name, images = entries.len(), "Rendered gallery");
    }

    fn image_block(&self, doc: &mut Document, name: &str, entry: &ImageEntry) -> NodeId {
        let block = doc.create_element("div");
        for (prop, value) in BLOCK_STYLES {
            doc.set_style(block, prop, value);
        }

        let img = doc.create_element("img");
        doc.set_attribute(img, "src", &self.image_path(name, &entry.file));
        doc.set_attribute(img, "alt", &entry.caption);
        doc.add_class(img, "gallery-image");
        for (prop, value) in IMAGE_STYLES {
            doc.set_style(img, prop, value);
        }

        let caption = doc.create_element("p");
        doc.set_text(caption, &entry.caption);
        for (prop, value) in CAPTION_STYLES {
            doc.set_style(caption, prop, value);
        }

        doc.append_child(block, img);
        doc.append_child(block, caption);
        block
    }

    /// `images/<gallery>/<file>`
    pub fn image_path(&self, name: &str, file: &str) -> String {
        format!("{}/{}/{}", self.image_root, name, file)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.is_active())
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn gallery_container(&self) -> NodeId {
        self.gallery_container
    }
}

/// Mount, fetch the manifest and build the tabs, propagating any failure
pub async fn try_load_galleries(page: Page, config: &Config) -> Result<TabbedGallery> {
    let mut gallery = TabbedGallery::mount(page, config)?;
    let loader = ManifestLoader::new(config)?;
    let manifest = loader.load_tabbed().await?;
    gallery.build_tabs(manifest)?;
    Ok(gallery)
}

/// Page entry point: failures are logged and leave the page untouched
pub async fn load_galleries(page: Page, config: &Config) -> Option<TabbedGallery> {
    match try_load_galleries(page, config).await {
        Ok(gallery) => Some(gallery),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load galleries");
            None
        }
    }
}
