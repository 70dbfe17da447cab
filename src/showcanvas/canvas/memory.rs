use super::CanvasSink;
use crate::error::{Result, ShowCanvasError};
use crate::layout::{AssetRef, ImageUpload, Placement};
use std::collections::HashSet;

/// In-memory canvas that records what it was asked to do.
/// Does NOT persist anything.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    placed: Vec<Placement>,
    uploads: Vec<ImageUpload>,
    failing_uploads: HashSet<String>,
    fail_place_at: Option<usize>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject uploads of this URL.
    pub fn failing_upload(mut self, url: impl Into<String>) -> Self {
        self.failing_uploads.insert(url.into());
        self
    }

    /// Reject the placement with this zero-based position (counting successful ones).
    pub fn failing_place_at(mut self, position: usize) -> Self {
        self.fail_place_at = Some(position);
        self
    }

    pub fn placed(&self) -> &[Placement] {
        &self.placed
    }

    pub fn uploads(&self) -> &[ImageUpload] {
        &self.uploads
    }
}

impl CanvasSink for RecordingCanvas {
    fn place(&mut self, placement: &Placement) -> Result<()> {
        if self.fail_place_at == Some(self.placed.len()) {
            return Err(ShowCanvasError::Canvas(format!(
                "element {} rejected",
                self.placed.len() + 1
            )));
        }
        self.placed.push(placement.clone());
        Ok(())
    }

    fn upload(&mut self, image: &ImageUpload) -> Result<AssetRef> {
        if self.failing_uploads.contains(&image.url) {
            return Err(ShowCanvasError::Upload(format!("could not fetch {}", image.url)));
        }
        self.uploads.push(image.clone());
        Ok(AssetRef(format!("recorded-{}", self.uploads.len())))
    }
}
