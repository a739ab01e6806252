//! Manifest data structures
//!
//! Two JSON shapes are accepted, one per renderer, and they are kept apart:
//! ```text
//! tabbed: { "Trip": [ { "file": "a.jpg", "caption": "A" } ] }
//! flat:   { "Trip": { "files": [ { "file": "a.jpg", "caption": "A" } ] } }
//! ```
//! Object key order is preserved and is the display order. A key repeated
//! in the document keeps its first position and its last value.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    /// File name relative to the gallery's image directory
    pub file: String,
    /// Used both as alt text and visible caption
    #[serde(default)]
    pub caption: String,
}

impl ImageEntry {
    pub fn new(file: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            caption: caption.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    pub name: String,
    pub entries: Vec<ImageEntry>,
}

/// Manifest consumed by the tabbed renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabbedManifest {
    galleries: Vec<Gallery>,
}

impl TabbedManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        let map: Map<String, Value> = serde_json::from_str(json)?;

        let galleries = map
            .into_iter()
            .map(|(name, value)| -> Result<Gallery> {
                let entries: Vec<ImageEntry> = serde_json::from_value(value)?;
                Ok(Gallery { name, entries })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { galleries })
    }

    pub fn from_galleries(galleries: Vec<Gallery>) -> Self {
        Self { galleries }
    }

    pub fn galleries(&self) -> &[Gallery] {
        &self.galleries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.galleries.iter().map(|g| g.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&[ImageEntry]> {
        self.galleries
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.entries.as_slice())
    }

    pub fn len(&self) -> usize {
        self.galleries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.galleries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    /// `None` when the folder carries no `files` list
    pub files: Option<Vec<ImageEntry>>,
}

/// Manifest consumed by the flat lazy renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatManifest {
    folders: Vec<Folder>,
}

impl FlatManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        let map: Map<String, Value> = serde_json::from_str(json)?;

        let folders = map
            .into_iter()
            .map(|(name, value)| -> Result<Folder> {
                let files = match value {
                    Value::Object(mut obj) => match obj.remove("files") {
                        None | Some(Value::Null) => None,
                        Some(files) => Some(serde_json::from_value::<Vec<ImageEntry>>(files)?),
                    },
                    _ => None,
                };
                Ok(Folder { name, files })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { folders })
    }

    pub fn from_folders(folders: Vec<Folder>) -> Self {
        Self { folders }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}
