use super::CanvasSink;
use crate::error::{Result, ShowCanvasError};
use crate::layout::{AssetRef, CANVAS_WIDTH, ImageSource, ImageUpload, Placement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// On-disk shape of a design file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    pub width: u32,
    #[serde(default)]
    pub assets: BTreeMap<String, ImageUpload>,
    #[serde(default)]
    pub elements: Vec<Placement>,
}

impl Default for DesignDocument {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            assets: BTreeMap::new(),
            elements: Vec::new(),
        }
    }
}

/// Canvas backed by a JSON design document.
///
/// The document is re-read and rewritten on every call so that a run which fails
/// halfway leaves the elements placed so far in the file.
pub struct DesignFile {
    path: PathBuf,
}

impl DesignFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<DesignDocument> {
        if !self.path.exists() {
            return Ok(DesignDocument::default());
        }
        let content = fs::read_to_string(&self.path).map_err(ShowCanvasError::Io)?;
        let doc = serde_json::from_str(&content).map_err(ShowCanvasError::Serialization)?;
        Ok(doc)
    }

    fn save(&self, doc: &DesignDocument) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(ShowCanvasError::Io)?;
        }
        let content = serde_json::to_string_pretty(doc).map_err(ShowCanvasError::Serialization)?;
        fs::write(&self.path, content).map_err(ShowCanvasError::Io)?;
        Ok(())
    }
}

impl CanvasSink for DesignFile {
    fn place(&mut self, placement: &Placement) -> Result<()> {
        let mut doc = self.load()?;

        if let Placement::Image(image) = placement {
            match &image.source {
                ImageSource::Pending(upload) => {
                    return Err(ShowCanvasError::Canvas(format!(
                        "image {} was placed before being uploaded",
                        upload.url
                    )));
                }
                ImageSource::Resolved { asset } if !doc.assets.contains_key(&asset.0) => {
                    return Err(ShowCanvasError::Canvas(format!("unknown asset {}", asset)));
                }
                ImageSource::Resolved { .. } => {}
            }
        }

        doc.elements.push(placement.clone());
        self.save(&doc)
    }

    fn upload(&mut self, image: &ImageUpload) -> Result<AssetRef> {
        if !(image.url.starts_with("http://") || image.url.starts_with("https://")) {
            return Err(ShowCanvasError::Upload(format!(
                "not a web image: {}",
                image.url
            )));
        }

        let mut doc = self.load()?;
        let id = format!("asset-{}", Uuid::new_v4());
        doc.assets.insert(id.clone(), image.clone());
        self.save(&doc)?;
        Ok(AssetRef(id))
    }
}
