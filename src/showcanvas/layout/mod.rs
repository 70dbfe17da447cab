//! # Layout Engine
//!
//! Turns a [`Show`] into an ordered list of [`Placement`]s on a canvas that is
//! [`CANVAS_WIDTH`] units wide. Two strategies exist:
//!
//! - [`poster::layout_show_poster`]: title, date line, optional cover, and a billing list
//! - [`grid::layout_performer_grid`]: a three-column grid of headshots with captions
//!
//! Layout is pure. Images are described with a pending [`ImageSource`]; resolving the upload
//! is the job of whoever submits the placements (see `commands::insert`).
//!
//! Placement order is significant: the host stacks elements in the order they are placed.

use crate::model::Show;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod grid;
pub mod poster;

pub use grid::{GridCell, grid_cell, layout_performer_grid};
pub use poster::layout_show_poster;

pub const CANVAS_WIDTH: u32 = 1080;

/// Mime type announced for every image upload.
pub const UPLOAD_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Start,
    Center,
    End,
}

/// Handle returned by a canvas after an upload. Opaque to everyone but the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(pub String);

impl fmt::Display for AssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub url: String,
    pub mime_type: String,
}

impl ImageUpload {
    pub fn jpeg(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime_type: UPLOAD_MIME_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ImageSource {
    Pending(ImageUpload),
    Resolved { asset: AssetRef },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPlacement {
    pub content: String,
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub color: String,
    pub align: TextAlign,
    pub top: u32,
    pub left: u32,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePlacement {
    pub source: ImageSource,
    pub top: u32,
    pub left: u32,
    pub width: u32,
    pub height: u32,
}

impl ImagePlacement {
    /// Same box, pointing at an uploaded asset.
    pub fn resolved(&self, asset: AssetRef) -> Self {
        Self {
            source: ImageSource::Resolved { asset },
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Placement {
    Text(TextPlacement),
    Image(ImagePlacement),
}

impl Placement {
    pub fn as_text(&self) -> Option<&TextPlacement> {
        match self {
            Placement::Text(text) => Some(text),
            Placement::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImagePlacement> {
        match self {
            Placement::Image(image) => Some(image),
            Placement::Text(_) => None,
        }
    }
}

/// Which layout strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Poster,
    Grid,
}

impl LayoutKind {
    pub fn layout(self, show: &Show) -> Vec<Placement> {
        match self {
            LayoutKind::Poster => layout_show_poster(show),
            LayoutKind::Grid => layout_performer_grid(show),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Poster => "poster",
            LayoutKind::Grid => "grid",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "poster" | "show" => Ok(LayoutKind::Poster),
            "grid" | "performers" => Ok(LayoutKind::Grid),
            other => Err(format!("unknown layout: {} (expected poster or grid)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_kind_parses_aliases() {
        assert_eq!("Poster".parse::<LayoutKind>(), Ok(LayoutKind::Poster));
        assert_eq!("performers".parse::<LayoutKind>(), Ok(LayoutKind::Grid));
        assert!("collage".parse::<LayoutKind>().is_err());
    }

    #[test]
    fn placement_serializes_with_type_tag() {
        let placement = Placement::Image(ImagePlacement {
            source: ImageSource::Resolved {
                asset: AssetRef("asset-1".into()),
            },
            top: 300,
            left: 290,
            width: 500,
            height: 500,
        });
        let json = serde_json::to_value(&placement).unwrap();
        assert_eq!(json["type"], "IMAGE");
        assert_eq!(json["source"]["state"], "resolved");
        assert_eq!(json["source"]["asset"], "asset-1");
    }
}
