//! Page event loop
//!
//! Visibility batches and image-load notifications arrive from the host on a
//! channel and are applied one at a time, in arrival order.

use tokio::sync::mpsc;
use vitrine_core::NodeId;

use crate::gallery::LazyGallery;
use crate::observer::IntersectionEntry;

#[derive(Debug, Clone)]
pub enum PageEvent {
    /// One observer callback's worth of entries
    Intersections(Vec<IntersectionEntry>),
    /// The host finished fetching an image
    ImageLoaded(NodeId),
}

impl LazyGallery {
    pub fn handle_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Intersections(entries) => {
                self.handle_intersections(&entries);
            }
            PageEvent::ImageLoaded(img) => {
                self.on_image_loaded(img);
            }
        }
    }

    /// Apply events until every sender is dropped
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<PageEvent>) {
        let mut handled = 0usize;
        while let Some(event) = events.recv().await {
            self.handle_event(event);
            handled += 1;
        }
        tracing::debug!(events = handled, "Page event loop finished");
    }
}
