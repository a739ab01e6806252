//! Headless rendering of both gallery variants

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use vitrine_core::{Config, Document, NodeId, Page};
use vitrine_lazy::{try_load_gallery, IntersectionEntry, IntersectionObserver, PageEvent};
use vitrine_tabs::{try_load_galleries, GALLERY_CONTAINER_ID, TABS_CONTAINER_ID};

pub async fn render_tabs(config: &Config, select: Option<&str>) -> Result<String> {
    let page = Page::new(Document::with_containers(&[
        TABS_CONTAINER_ID,
        GALLERY_CONTAINER_ID,
    ]));

    let mut gallery = try_load_galleries(page, config)
        .await
        .context("Failed to load galleries")?;

    if let Some(name) = select {
        gallery
            .on_tab_selected(name)
            .with_context(|| format!("Cannot select gallery {name}"))?;
    }

    Ok(gallery.page().to_html())
}

/// Render the flat gallery, then report the first `visible` images as
/// visible and loaded through the page event loop
pub async fn render_lazy(config: &Config, visible: usize) -> Result<String> {
    let page = Page::new(Document::with_containers(&[vitrine_lazy::GALLERY_ID]));

    let mut gallery = try_load_gallery(page, config, IntersectionObserver::default())
        .await
        .context("Failed to load image manifest")?;

    let targets: Vec<NodeId> = gallery.images().iter().take(visible).copied().collect();

    let (tx, rx) = mpsc::unbounded_channel();
    tx.send(PageEvent::Intersections(
        targets
            .iter()
            .map(|img| IntersectionEntry::visible(*img, 1.0))
            .collect(),
    ))?;
    for img in targets {
        tx.send(PageEvent::ImageLoaded(img))?;
    }
    drop(tx);

    gallery.run(rx).await;

    Ok(gallery.page().to_html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_core::testing::serve_once;

    #[tokio::test]
    async fn test_render_tabs_with_selection() {
        let base = serve_once(
            200,
            r#"{"Trip": [{"file": "a.jpg", "caption": "A"}], "Home": [{"file": "h.jpg", "caption": "H"}]}"#,
        )
        .await;

        let html = render_tabs(&Config::new(base), Some("Home")).await.unwrap();
        assert!(html.contains(r#"<button class="tab-button active">Home</button>"#));
        assert!(html.contains(r#"src="images/Home/h.jpg""#));
        assert!(!html.contains("images/Trip/a.jpg"));
    }

    #[tokio::test]
    async fn test_render_lazy_marks_visible_images() {
        let base = serve_once(
            200,
            r#"{"f": {"files": [{"file": "1.jpg", "caption": "one"}, {"file": "2.jpg", "caption": "two"}]}}"#,
        )
        .await;

        let html = render_lazy(&Config::new(base), 1).await.unwrap();
        assert!(html.contains(r#" src="images/1.jpg""#));
        assert!(html.contains(r#"class="lazy-image loaded""#));
        assert!(html.contains(r#" data-src="images/2.jpg""#));
        assert!(!html.contains(r#" src="images/2.jpg""#));
    }

    #[tokio::test]
    async fn test_render_fails_on_not_found() {
        let base = serve_once(404, "").await;
        assert!(render_tabs(&Config::new(base), None).await.is_err());
    }
}
