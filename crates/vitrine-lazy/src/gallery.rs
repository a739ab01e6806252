//! Flat lazy gallery renderer

use std::collections::HashMap;

use vitrine_core::{Config, Document, FlatManifest, ManifestLoader, NodeId, Page};

use crate::image::{LazyImage, LazyState};
use crate::observer::{IntersectionEntry, IntersectionObserver};
use crate::Result;

pub const GALLERY_ID: &str = "gallery";

const ITEM_CLASS: &str = "gallery-item";
const IMAGE_CLASS: &str = "lazy-image";
const CAPTION_CLASS: &str = "caption";
const LOADED_CLASS: &str = "loaded";
const DEFERRED_SRC: &str = "data-src";

/// One image of the flattened manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub folder: String,
    pub file: String,
    pub caption: String,
}

/// Folders in manifest order, files in list order. Folders without a
/// `files` list contribute nothing.
pub fn flatten(manifest: &FlatManifest) -> Vec<FlatEntry> {
    manifest
        .folders()
        .iter()
        .filter_map(|folder| folder.files.as_ref().map(|files| (folder, files)))
        .flat_map(|(folder, files)| {
            files.iter().map(move |entry| FlatEntry {
                folder: folder.name.clone(),
                file: entry.file.clone(),
                caption: entry.caption.clone(),
            })
        })
        .collect()
}

pub struct LazyGallery {
    page: Page,
    container: NodeId,
    image_root: String,
    observer: IntersectionObserver,
    /// Keyed by `img` element
    images: HashMap<NodeId, LazyImage>,
    /// `img` elements in render order
    order: Vec<NodeId>,
}

impl LazyGallery {
    /// Bind to the page's `#gallery` container with the shared observer
    pub fn mount(page: Page, config: &Config, observer: IntersectionObserver) -> Result<Self> {
        let container = page.require_element(GALLERY_ID)?;

        Ok(Self {
            page,
            container,
            image_root: config.image_root.clone(),
            observer,
            images: HashMap::new(),
            order: Vec::new(),
        })
    }

    /// Build a `div.gallery-item` holding an unfetched `img.lazy-image` and
    /// its caption. Returns `(item, img)`.
    pub fn create_item(&self, doc: &mut Document, file: &str, caption: &str) -> (NodeId, NodeId) {
        let item = doc.create_element("div");
        doc.add_class(item, ITEM_CLASS);

        let img = doc.create_element("img");
        doc.set_attribute(img, DEFERRED_SRC, &self.image_path(file));
        doc.set_attribute(img, "alt", caption);
        doc.add_class(img, IMAGE_CLASS);

        let caption_el = doc.create_element("div");
        doc.add_class(caption_el, CAPTION_CLASS);
        doc.set_text(caption_el, caption);

        doc.append_child(item, img);
        doc.append_child(item, caption_el);
        (item, img)
    }

    /// Append one item per flattened entry, then start observing every image
    pub fn render(&mut self, manifest: &FlatManifest) -> usize {
        let entries = flatten(manifest);

        {
            let mut doc = self.page.write();
            for entry in &entries {
                let (item, img) = self.create_item(&mut doc, &entry.file, &entry.caption);
                doc.append_child(self.container, item);

                let deferred = self.image_path(&entry.file);
                self.images.insert(img, LazyImage::new(img, deferred));
                self.order.push(img);
            }
        }

        for img in self.order.clone() {
            if let Some(image) = self.images.get_mut(&img) {
                if image.transition_to(LazyState::Observed).is_ok() {
                    self.observer.observe(img);
                }
            }
        }

        let options = self.observer.options();
        tracing::info!(
            images = entries.len(),
            root_margin = %options.root_margin,
            threshold = options.threshold,
            viewport = options.root.is_none(),
            "Rendered lazy gallery"
        );
        entries.len()
    }

    /// Start loading every observed image that became visible.
    ///
    /// Returns how many images started loading.
    pub fn handle_intersections(&mut self, entries: &[IntersectionEntry]) -> usize {
        let triggered = self.observer.triggered(entries);
        let mut started = 0;

        for img in triggered {
            // A batch may report the same target twice
            if !self.observer.is_observing(img) {
                continue;
            }
            let Some(image) = self.images.get_mut(&img) else {
                continue;
            };

            if let Err(e) = image.transition_to(LazyState::Loading) {
                tracing::debug!(image = %img, error = %e, "Ignoring intersection");
                continue;
            }

            self.page.write().set_attribute(img, "src", &image.deferred_src);
            self.observer.unobserve(img);
            started += 1;

            tracing::debug!(image = %img, src = %image.deferred_src, "Image entered viewport");
        }

        started
    }

    /// Host callback once an image finished loading.
    ///
    /// Returns false if the image was not loading.
    pub fn on_image_loaded(&mut self, img: NodeId) -> bool {
        let Some(image) = self.images.get_mut(&img) else {
            return false;
        };

        if let Err(e) = image.transition_to(LazyState::Loaded) {
            tracing::debug!(image = %img, error = %e, "Ignoring load notification");
            return false;
        }

        self.page.write().add_class(img, LOADED_CLASS);
        true
    }

    /// `images/<file>`
    pub fn image_path(&self, file: &str) -> String {
        format!("{}/{}", self.image_root, file)
    }

    pub fn state(&self, img: NodeId) -> Option<LazyState> {
        self.images.get(&img).map(|i| i.state)
    }

    /// `img` elements in render order
    pub fn images(&self) -> &[NodeId] {
        &self.order
    }

    pub fn observer(&self) -> &IntersectionObserver {
        &self.observer
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn container(&self) -> NodeId {
        self.container
    }
}

/// Mount, fetch the manifest and render, propagating any failure
pub async fn try_load_gallery(
    page: Page,
    config: &Config,
    observer: IntersectionObserver,
) -> Result<LazyGallery> {
    let mut gallery = LazyGallery::mount(page, config, observer)?;
    let loader = ManifestLoader::new(config)?;
    let manifest = loader.load_flat().await?;
    gallery.render(&manifest);
    Ok(gallery)
}

/// Page entry point: failures are logged and leave the page untouched
pub async fn load_gallery(
    page: Page,
    config: &Config,
    observer: IntersectionObserver,
) -> Option<LazyGallery> {
    match try_load_gallery(page, config, observer).await {
        Ok(gallery) => Some(gallery),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load image manifest");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};
    use vitrine_core::testing::{capture_errors, serve_once};
    use vitrine_core::{Folder, ImageEntry};

    fn page() -> Page {
        Page::new(Document::with_containers(&[GALLERY_ID]))
    }

    fn manifest() -> FlatManifest {
        FlatManifest::from_folders(vec![
            Folder {
                name: "f1".to_string(),
                files: Some(vec![
                    ImageEntry::new("x.jpg", "X"),
                    ImageEntry::new("y.jpg", "Y"),
                ]),
            },
            Folder {
                name: "f2".to_string(),
                files: None,
            },
            Folder {
                name: "f3".to_string(),
                files: Some(vec![ImageEntry::new("z.jpg", "Z")]),
            },
        ])
    }

    fn mounted() -> LazyGallery {
        let mut gallery =
            LazyGallery::mount(page(), &Config::default(), IntersectionObserver::default())
                .unwrap();
        gallery.render(&manifest());
        gallery
    }

    #[test]
    fn test_flatten_skips_folders_without_files() {
        let manifest = FlatManifest::from_json(
            r#"{"f1": {"files": [{"file": "x.jpg", "caption": "X"}]}, "f2": {}}"#,
        )
        .unwrap();

        let flat = flatten(&manifest);
        assert_eq!(
            flat,
            vec![FlatEntry {
                folder: "f1".to_string(),
                file: "x.jpg".to_string(),
                caption: "X".to_string(),
            }]
        );
    }

    #[test]
    fn test_flatten_order() {
        let files: Vec<String> = flatten(&manifest()).into_iter().map(|e| e.file).collect();
        assert_eq!(files, vec!["x.jpg", "y.jpg", "z.jpg"]);
    }

    #[test]
    fn test_create_item_defers_source() {
        let gallery =
            LazyGallery::mount(page(), &Config::default(), IntersectionObserver::default())
                .unwrap();
        let (item, img) = {
            let mut doc = gallery.page().write();
            gallery.create_item(&mut doc, "x.jpg", "X")
        };

        let doc = gallery.page().read();
        assert!(doc.has_class(item, "gallery-item"));
        assert_eq!(doc.get_attribute(img, "data-src"), Some("images/x.jpg"));
        assert_eq!(doc.get_attribute(img, "alt"), Some("X"));
        assert!(doc.get_attribute(img, "src").is_none());
        assert_eq!(doc.text(item), "X");
        // Not attached until rendered
        assert!(doc.query_by_class("gallery-item").is_empty());
    }

    #[test]
    fn test_render_observes_every_image() {
        let gallery = mounted();

        assert_eq!(gallery.images().len(), 3);
        assert_eq!(gallery.observer().observed_count(), 3);
        for img in gallery.images() {
            assert_eq!(gallery.state(*img), Some(LazyState::Observed));
            assert!(gallery.page().read().get_attribute(*img, "src").is_none());
        }

        let html = gallery.page().to_html();
        let parsed = Html::parse_document(&html);
        let sel = Selector::parse("#gallery > div.gallery-item > img.lazy-image").unwrap();
        let srcs: Vec<_> = parsed
            .select(&sel)
            .filter_map(|el| el.value().attr("data-src"))
            .collect();
        assert_eq!(srcs, vec!["images/x.jpg", "images/y.jpg", "images/z.jpg"]);
    }

    #[test]
    fn test_intersection_loads_once() {
        let mut gallery = mounted();
        let img = gallery.images()[1];

        let started = gallery.handle_intersections(&[IntersectionEntry::visible(img, 0.4)]);
        assert_eq!(started, 1);
        assert_eq!(gallery.state(img), Some(LazyState::Loading));
        assert!(!gallery.observer().is_observing(img));
        assert_eq!(
            gallery.page().read().get_attribute(img, "src"),
            Some("images/y.jpg")
        );

        let before = gallery.page().read().mutation_count();
        let again = gallery.handle_intersections(&[IntersectionEntry::visible(img, 1.0)]);
        assert_eq!(again, 0);
        assert_eq!(gallery.page().read().mutation_count(), before);
        assert_eq!(gallery.state(img), Some(LazyState::Loading));
    }

    #[test]
    fn test_duplicate_target_in_one_batch() {
        let mut gallery = mounted();
        let img = gallery.images()[0];

        let started = gallery.handle_intersections(&[
            IntersectionEntry::visible(img, 0.2),
            IntersectionEntry::visible(img, 0.9),
        ]);
        assert_eq!(started, 1);
    }

    #[test]
    fn test_hidden_entry_does_nothing() {
        let mut gallery = mounted();
        let img = gallery.images()[0];

        let started = gallery.handle_intersections(&[IntersectionEntry::hidden(img)]);
        assert_eq!(started, 0);
        assert_eq!(gallery.state(img), Some(LazyState::Observed));
        assert!(gallery.observer().is_observing(img));
        assert_eq!(gallery.page().read().get_attribute(img, "src"), None);
    }

    #[test]
    fn test_small_intersection_starts_loading() {
        let mut gallery = mounted();
        let img = gallery.images()[0];

        let started = gallery.handle_intersections(&[IntersectionEntry::visible(img, 0.05)]);
        assert_eq!(started, 1);
        assert_eq!(gallery.state(img), Some(LazyState::Loading));
        assert!(!gallery.observer().is_observing(img));
        assert_eq!(
            gallery.page().read().get_attribute(img, "src"),
            Some("images/x.jpg")
        );
    }

    #[test]
    fn test_loaded_class_after_load() {
        let mut gallery = mounted();
        let img = gallery.images()[2];

        // Load reported before the image was ever visible is ignored
        assert!(!gallery.on_image_loaded(img));
        assert!(!gallery.page().read().has_class(img, "loaded"));

        gallery.handle_intersections(&[IntersectionEntry::visible(img, 1.0)]);
        assert!(gallery.on_image_loaded(img));
        assert_eq!(gallery.state(img), Some(LazyState::Loaded));
        assert!(gallery.page().read().has_class(img, "loaded"));

        assert!(!gallery.on_image_loaded(img));
    }

    #[test]
    fn test_missing_container() {
        let page = Page::new(Document::with_containers(&["gallery-container"]));
        let result = LazyGallery::mount(page, &Config::default(), IntersectionObserver::default());
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_load_gallery_from_server() {
        let base = serve_once(
            200,
            r#"{"f1": {"files": [{"file": "x.jpg", "caption": "X"}]}, "f2": {}}"#,
        )
        .await;

        let gallery = load_gallery(page(), &Config::new(base), IntersectionObserver::default())
            .await
            .unwrap();
        assert_eq!(gallery.images().len(), 1);
    }

    #[tokio::test]
    async fn test_not_found_leaves_page_untouched() {
        let (errors, _guard) = capture_errors();
        let base = serve_once(404, "").await;
        let page = page();

        let result =
            load_gallery(page.clone(), &Config::new(base), IntersectionObserver::default()).await;

        assert!(result.is_none());
        assert_eq!(page.read().mutation_count(), 0);
        assert_eq!(errors.count(), 1);
    }
}
