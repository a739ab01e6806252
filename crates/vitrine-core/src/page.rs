//! Shared page handle
//!
//! The document is owned by one `Page`; renderers, the event loop and the
//! caller hold clones of the handle. All mutation goes through `write()`.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

use crate::dom::{Document, NodeId};
use crate::error::GalleryError;
use crate::Result;

pub struct Page {
    doc: Arc<RwLock<Document>>,
}

impl Page {
    pub fn new(doc: Document) -> Self {
        Self {
            doc: Arc::new(RwLock::new(doc)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Document> {
        self.doc.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Document> {
        self.doc.write()
    }

    /// Resolve a container element that must exist before rendering
    pub fn require_element(&self, id: &str) -> Result<NodeId> {
        self.doc
            .read()
            .get_element_by_id(id)
            .ok_or_else(|| GalleryError::DomNotFound(id.to_string()))
    }

    pub fn to_html(&self) -> String {
        self.doc.read().to_html()
    }
}

impl Clone for Page {
    fn clone(&self) -> Self {
        Self {
            doc: Arc::clone(&self.doc),
        }
    }
}
